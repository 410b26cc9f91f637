//! Compiled-in country reference table
//!
//! One row per country: ISO 3166-1 alpha-2 code, display name, ccTLD (without
//! the leading dot), spoken languages ranked by prominence, and a relative web
//! weight used to derive the catalog priors.

/// Raw catalog row
#[derive(Debug, Clone, Copy)]
pub struct CountryRecord {
    pub iso: &'static str,
    pub name: &'static str,
    pub tld: &'static str,
    pub languages: &'static [&'static str],
    pub web_weight: f64,
}

pub const COUNTRY_TABLE: &[CountryRecord] = &[
    CountryRecord { iso: "ad", name: "Andorra", tld: "ad", languages: &["ca"], web_weight: 1.0 },
    CountryRecord { iso: "ae", name: "United Arab Emirates", tld: "ae", languages: &["ar", "fa", "en", "hi", "ur"], web_weight: 40.0 },
    CountryRecord { iso: "af", name: "Afghanistan", tld: "af", languages: &["fa", "ps", "uz", "tk"], web_weight: 3.0 },
    CountryRecord { iso: "ag", name: "Antigua and Barbuda", tld: "ag", languages: &["en"], web_weight: 1.0 },
    CountryRecord { iso: "ai", name: "Anguilla", tld: "ai", languages: &["en"], web_weight: 1.0 },
    CountryRecord { iso: "al", name: "Albania", tld: "al", languages: &["sq", "el"], web_weight: 4.0 },
    CountryRecord { iso: "am", name: "Armenia", tld: "am", languages: &["hy"], web_weight: 3.0 },
    CountryRecord { iso: "ao", name: "Angola", tld: "ao", languages: &["pt"], web_weight: 3.0 },
    CountryRecord { iso: "aq", name: "Antarctica", tld: "aq", languages: &[], web_weight: 0.0 },
    CountryRecord { iso: "ar", name: "Argentina", tld: "ar", languages: &["es", "en", "it", "de", "fr"], web_weight: 120.0 },
    CountryRecord { iso: "as", name: "American Samoa", tld: "as", languages: &["en", "sm", "to"], web_weight: 1.0 },
    CountryRecord { iso: "at", name: "Austria", tld: "at", languages: &["de", "hr", "hu", "sl"], web_weight: 150.0 },
    CountryRecord { iso: "au", name: "Australia", tld: "au", languages: &["en"], web_weight: 600.0 },
    CountryRecord { iso: "aw", name: "Aruba", tld: "aw", languages: &["nl", "pap", "es", "en"], web_weight: 1.0 },
    CountryRecord { iso: "ax", name: "Aland Islands", tld: "ax", languages: &["sv"], web_weight: 1.0 },
    CountryRecord { iso: "az", name: "Azerbaijan", tld: "az", languages: &["az", "ru", "hy"], web_weight: 5.0 },
    CountryRecord { iso: "ba", name: "Bosnia and Herzegovina", tld: "ba", languages: &["bs", "hr", "sr"], web_weight: 5.0 },
    CountryRecord { iso: "bb", name: "Barbados", tld: "bb", languages: &["en"], web_weight: 1.0 },
    CountryRecord { iso: "bd", name: "Bangladesh", tld: "bd", languages: &["bn", "en"], web_weight: 20.0 },
    CountryRecord { iso: "be", name: "Belgium", tld: "be", languages: &["nl", "fr", "de"], web_weight: 150.0 },
    CountryRecord { iso: "bf", name: "Burkina Faso", tld: "bf", languages: &["fr"], web_weight: 1.0 },
    CountryRecord { iso: "bg", name: "Bulgaria", tld: "bg", languages: &["bg", "tr"], web_weight: 30.0 },
    CountryRecord { iso: "bh", name: "Bahrain", tld: "bh", languages: &["ar", "en", "fa", "ur"], web_weight: 3.0 },
    CountryRecord { iso: "bi", name: "Burundi", tld: "bi", languages: &["fr", "rn"], web_weight: 1.0 },
    CountryRecord { iso: "bj", name: "Benin", tld: "bj", languages: &["fr"], web_weight: 1.0 },
    CountryRecord { iso: "bl", name: "Saint Barthelemy", tld: "bl", languages: &["fr"], web_weight: 1.0 },
    CountryRecord { iso: "bm", name: "Bermuda", tld: "bm", languages: &["en", "pt"], web_weight: 1.0 },
    CountryRecord { iso: "bn", name: "Brunei", tld: "bn", languages: &["ms", "en"], web_weight: 1.0 },
    CountryRecord { iso: "bo", name: "Bolivia", tld: "bo", languages: &["es", "qu", "ay"], web_weight: 5.0 },
    CountryRecord { iso: "bq", name: "Bonaire, Saint Eustatius and Saba", tld: "bq", languages: &["nl", "pap", "en"], web_weight: 1.0 },
    CountryRecord { iso: "br", name: "Brazil", tld: "br", languages: &["pt", "es", "en", "fr"], web_weight: 400.0 },
    CountryRecord { iso: "bs", name: "Bahamas", tld: "bs", languages: &["en"], web_weight: 1.0 },
    CountryRecord { iso: "bt", name: "Bhutan", tld: "bt", languages: &["dz"], web_weight: 1.0 },
    CountryRecord { iso: "bv", name: "Bouvet Island", tld: "bv", languages: &[], web_weight: 0.0 },
    CountryRecord { iso: "bw", name: "Botswana", tld: "bw", languages: &["en", "tn"], web_weight: 1.0 },
    CountryRecord { iso: "by", name: "Belarus", tld: "by", languages: &["be", "ru"], web_weight: 10.0 },
    CountryRecord { iso: "bz", name: "Belize", tld: "bz", languages: &["en", "es"], web_weight: 1.0 },
    CountryRecord { iso: "ca", name: "Canada", tld: "ca", languages: &["en", "fr", "iu"], web_weight: 500.0 },
    CountryRecord { iso: "cc", name: "Cocos Islands", tld: "cc", languages: &["ms", "en"], web_weight: 0.0 },
    CountryRecord { iso: "cd", name: "Democratic Republic of the Congo", tld: "cd", languages: &["fr", "ln", "ktu", "kg", "sw", "lua"], web_weight: 2.0 },
    CountryRecord { iso: "cf", name: "Central African Republic", tld: "cf", languages: &["fr", "sg", "ln", "kg"], web_weight: 1.0 },
    CountryRecord { iso: "cg", name: "Republic of the Congo", tld: "cg", languages: &["fr", "kg", "ln"], web_weight: 1.0 },
    CountryRecord { iso: "ch", name: "Switzerland", tld: "ch", languages: &["de", "fr", "it", "rm"], web_weight: 220.0 },
    CountryRecord { iso: "ci", name: "Ivory Coast", tld: "ci", languages: &["fr"], web_weight: 2.0 },
    CountryRecord { iso: "ck", name: "Cook Islands", tld: "ck", languages: &["en", "mi"], web_weight: 0.0 },
    CountryRecord { iso: "cl", name: "Chile", tld: "cl", languages: &["es"], web_weight: 60.0 },
    CountryRecord { iso: "cm", name: "Cameroon", tld: "cm", languages: &["en", "fr"], web_weight: 2.0 },
    CountryRecord { iso: "cn", name: "China", tld: "cn", languages: &["zh", "ug", "za"], web_weight: 700.0 },
    CountryRecord { iso: "co", name: "Colombia", tld: "co", languages: &["es"], web_weight: 50.0 },
    CountryRecord { iso: "cr", name: "Costa Rica", tld: "cr", languages: &["es", "en"], web_weight: 5.0 },
    CountryRecord { iso: "cu", name: "Cuba", tld: "cu", languages: &["es"], web_weight: 3.0 },
    CountryRecord { iso: "cv", name: "Cape Verde", tld: "cv", languages: &["pt"], web_weight: 1.0 },
    CountryRecord { iso: "cw", name: "Curacao", tld: "cw", languages: &["nl"], web_weight: 1.0 },
    CountryRecord { iso: "cx", name: "Christmas Island", tld: "cx", languages: &["en", "zh", "ms"], web_weight: 0.0 },
    CountryRecord { iso: "cy", name: "Cyprus", tld: "cy", languages: &["el", "tr", "en"], web_weight: 5.0 },
    CountryRecord { iso: "cz", name: "Czechia", tld: "cz", languages: &["cs", "sk"], web_weight: 100.0 },
    CountryRecord { iso: "de", name: "Germany", tld: "de", languages: &["de"], web_weight: 1100.0 },
    CountryRecord { iso: "dj", name: "Djibouti", tld: "dj", languages: &["fr", "ar", "so", "aa"], web_weight: 1.0 },
    CountryRecord { iso: "dk", name: "Denmark", tld: "dk", languages: &["da", "en", "fo", "de"], web_weight: 90.0 },
    CountryRecord { iso: "dm", name: "Dominica", tld: "dm", languages: &["en"], web_weight: 1.0 },
    CountryRecord { iso: "do", name: "Dominican Republic", tld: "do", languages: &["es"], web_weight: 5.0 },
    CountryRecord { iso: "dz", name: "Algeria", tld: "dz", languages: &["ar"], web_weight: 8.0 },
    CountryRecord { iso: "ec", name: "Ecuador", tld: "ec", languages: &["es"], web_weight: 8.0 },
    CountryRecord { iso: "ee", name: "Estonia", tld: "ee", languages: &["et", "ru"], web_weight: 10.0 },
    CountryRecord { iso: "eg", name: "Egypt", tld: "eg", languages: &["ar", "en", "fr"], web_weight: 25.0 },
    CountryRecord { iso: "eh", name: "Western Sahara", tld: "eh", languages: &["ar", "mey"], web_weight: 0.0 },
    CountryRecord { iso: "er", name: "Eritrea", tld: "er", languages: &["aa", "ar", "tig", "kun", "ti"], web_weight: 1.0 },
    CountryRecord { iso: "es", name: "Spain", tld: "es", languages: &["es", "ca", "gl", "eu", "oc"], web_weight: 350.0 },
    CountryRecord { iso: "et", name: "Ethiopia", tld: "et", languages: &["am", "en", "om", "ti", "so", "sid"], web_weight: 3.0 },
    CountryRecord { iso: "fi", name: "Finland", tld: "fi", languages: &["fi", "sv", "smn"], web_weight: 70.0 },
    CountryRecord { iso: "fj", name: "Fiji", tld: "fj", languages: &["en", "fj"], web_weight: 1.0 },
    CountryRecord { iso: "fk", name: "Falkland Islands", tld: "fk", languages: &["en"], web_weight: 0.0 },
    CountryRecord { iso: "fm", name: "Micronesia", tld: "fm", languages: &["en", "chk", "pon", "yap", "kos", "uli", "woe", "nkr", "kpg"], web_weight: 0.0 },
    CountryRecord { iso: "fo", name: "Faroe Islands", tld: "fo", languages: &["fo", "da"], web_weight: 1.0 },
    CountryRecord { iso: "fr", name: "France", tld: "fr", languages: &["fr", "frp", "br", "co", "ca", "eu", "oc"], web_weight: 700.0 },
    CountryRecord { iso: "ga", name: "Gabon", tld: "ga", languages: &["fr"], web_weight: 1.0 },
    CountryRecord { iso: "gb", name: "United Kingdom", tld: "uk", languages: &["en", "cy", "gd"], web_weight: 900.0 },
    CountryRecord { iso: "gd", name: "Grenada", tld: "gd", languages: &["en"], web_weight: 1.0 },
    CountryRecord { iso: "ge", name: "Georgia", tld: "ge", languages: &["ka", "ru", "hy", "az"], web_weight: 4.0 },
    CountryRecord { iso: "gf", name: "French Guiana", tld: "gf", languages: &["fr"], web_weight: 1.0 },
    CountryRecord { iso: "gg", name: "Guernsey", tld: "gg", languages: &["en", "nrf"], web_weight: 1.0 },
    CountryRecord { iso: "gh", name: "Ghana", tld: "gh", languages: &["en", "ak", "ee", "tw"], web_weight: 4.0 },
    CountryRecord { iso: "gi", name: "Gibraltar", tld: "gi", languages: &["en", "es", "it", "pt"], web_weight: 1.0 },
    CountryRecord { iso: "gl", name: "Greenland", tld: "gl", languages: &["kl", "da", "en"], web_weight: 1.0 },
    CountryRecord { iso: "gm", name: "Gambia", tld: "gm", languages: &["en", "mnk", "wof", "wo", "ff"], web_weight: 1.0 },
    CountryRecord { iso: "gn", name: "Guinea", tld: "gn", languages: &["fr"], web_weight: 1.0 },
    CountryRecord { iso: "gp", name: "Guadeloupe", tld: "gp", languages: &["fr"], web_weight: 1.0 },
    CountryRecord { iso: "gq", name: "Equatorial Guinea", tld: "gq", languages: &["es", "fr"], web_weight: 1.0 },
    CountryRecord { iso: "gr", name: "Greece", tld: "gr", languages: &["el", "en", "fr"], web_weight: 60.0 },
    CountryRecord { iso: "gs", name: "South Georgia and the South Sandwich Islands", tld: "gs", languages: &["en"], web_weight: 0.0 },
    CountryRecord { iso: "gt", name: "Guatemala", tld: "gt", languages: &["es"], web_weight: 4.0 },
    CountryRecord { iso: "gu", name: "Guam", tld: "gu", languages: &["en", "ch"], web_weight: 1.0 },
    CountryRecord { iso: "gw", name: "Guinea-Bissau", tld: "gw", languages: &["pt"], web_weight: 1.0 },
    CountryRecord { iso: "gy", name: "Guyana", tld: "gy", languages: &["en"], web_weight: 1.0 },
    CountryRecord { iso: "hk", name: "Hong Kong", tld: "hk", languages: &["zh", "en"], web_weight: 40.0 },
    CountryRecord { iso: "hm", name: "Heard Island and McDonald Islands", tld: "hm", languages: &[], web_weight: 0.0 },
    CountryRecord { iso: "hn", name: "Honduras", tld: "hn", languages: &["es"], web_weight: 2.0 },
    CountryRecord { iso: "hr", name: "Croatia", tld: "hr", languages: &["hr", "sr"], web_weight: 20.0 },
    CountryRecord { iso: "ht", name: "Haiti", tld: "ht", languages: &["ht", "fr"], web_weight: 1.0 },
    CountryRecord { iso: "hu", name: "Hungary", tld: "hu", languages: &["hu"], web_weight: 50.0 },
    CountryRecord { iso: "id", name: "Indonesia", tld: "id", languages: &["id", "en", "nl", "jv"], web_weight: 80.0 },
    CountryRecord { iso: "ie", name: "Ireland", tld: "ie", languages: &["en", "ga"], web_weight: 50.0 },
    CountryRecord { iso: "il", name: "Israel", tld: "il", languages: &["he", "ar", "en"], web_weight: 50.0 },
    CountryRecord { iso: "im", name: "Isle of Man", tld: "im", languages: &["en", "gv"], web_weight: 1.0 },
    CountryRecord { iso: "in", name: "India", tld: "in", languages: &["en", "hi", "bn", "te", "mr", "ta", "ur", "gu", "kn", "ml", "or", "pa", "as", "bh", "sat", "ks", "ne", "sd", "kok", "doi", "mni", "sit", "sa", "fr", "lus", "inc"], web_weight: 350.0 },
    CountryRecord { iso: "io", name: "British Indian Ocean Territory", tld: "io", languages: &["en"], web_weight: 0.0 },
    CountryRecord { iso: "iq", name: "Iraq", tld: "iq", languages: &["ar", "ku", "hy"], web_weight: 4.0 },
    CountryRecord { iso: "ir", name: "Iran", tld: "ir", languages: &["fa", "ku"], web_weight: 40.0 },
    CountryRecord { iso: "is", name: "Iceland", tld: "is", languages: &["is", "en", "de", "da", "sv", "no"], web_weight: 5.0 },
    CountryRecord { iso: "it", name: "Italy", tld: "it", languages: &["it", "de", "fr", "sc", "ca", "co", "sl"], web_weight: 450.0 },
    CountryRecord { iso: "je", name: "Jersey", tld: "je", languages: &["en", "fr", "nrf"], web_weight: 1.0 },
    CountryRecord { iso: "jm", name: "Jamaica", tld: "jm", languages: &["en"], web_weight: 2.0 },
    CountryRecord { iso: "jo", name: "Jordan", tld: "jo", languages: &["ar", "en"], web_weight: 4.0 },
    CountryRecord { iso: "jp", name: "Japan", tld: "jp", languages: &["ja"], web_weight: 650.0 },
    CountryRecord { iso: "ke", name: "Kenya", tld: "ke", languages: &["en", "sw"], web_weight: 8.0 },
    CountryRecord { iso: "kg", name: "Kyrgyzstan", tld: "kg", languages: &["ky", "uz", "ru"], web_weight: 2.0 },
    CountryRecord { iso: "kh", name: "Cambodia", tld: "kh", languages: &["km", "fr", "en"], web_weight: 2.0 },
    CountryRecord { iso: "ki", name: "Kiribati", tld: "ki", languages: &["en", "gil"], web_weight: 0.0 },
    CountryRecord { iso: "km", name: "Comoros", tld: "km", languages: &["ar", "fr"], web_weight: 0.0 },
    CountryRecord { iso: "kn", name: "Saint Kitts and Nevis", tld: "kn", languages: &["en"], web_weight: 0.0 },
    CountryRecord { iso: "kp", name: "North Korea", tld: "kp", languages: &["ko"], web_weight: 1.0 },
    CountryRecord { iso: "kr", name: "South Korea", tld: "kr", languages: &["ko", "en"], web_weight: 200.0 },
    CountryRecord { iso: "kw", name: "Kuwait", tld: "kw", languages: &["ar", "en"], web_weight: 5.0 },
    CountryRecord { iso: "ky", name: "Cayman Islands", tld: "ky", languages: &["en"], web_weight: 1.0 },
    CountryRecord { iso: "kz", name: "Kazakhstan", tld: "kz", languages: &["kk", "ru"], web_weight: 10.0 },
    CountryRecord { iso: "la", name: "Laos", tld: "la", languages: &["lo", "fr", "en"], web_weight: 1.0 },
    CountryRecord { iso: "lb", name: "Lebanon", tld: "lb", languages: &["ar", "fr", "en", "hy"], web_weight: 5.0 },
    CountryRecord { iso: "lc", name: "Saint Lucia", tld: "lc", languages: &["en"], web_weight: 1.0 },
    CountryRecord { iso: "li", name: "Liechtenstein", tld: "li", languages: &["de"], web_weight: 1.0 },
    CountryRecord { iso: "lk", name: "Sri Lanka", tld: "lk", languages: &["si", "ta", "en"], web_weight: 5.0 },
    CountryRecord { iso: "lr", name: "Liberia", tld: "lr", languages: &["en"], web_weight: 1.0 },
    CountryRecord { iso: "ls", name: "Lesotho", tld: "ls", languages: &["en", "st", "zu", "xh"], web_weight: 1.0 },
    CountryRecord { iso: "lt", name: "Lithuania", tld: "lt", languages: &["lt", "ru", "pl"], web_weight: 15.0 },
    CountryRecord { iso: "lu", name: "Luxembourg", tld: "lu", languages: &["lb", "de", "fr"], web_weight: 10.0 },
    CountryRecord { iso: "lv", name: "Latvia", tld: "lv", languages: &["lv", "ru", "lt"], web_weight: 10.0 },
    CountryRecord { iso: "ly", name: "Libya", tld: "ly", languages: &["ar", "it", "en"], web_weight: 2.0 },
    CountryRecord { iso: "ma", name: "Morocco", tld: "ma", languages: &["ar", "ber", "fr"], web_weight: 10.0 },
    CountryRecord { iso: "mc", name: "Monaco", tld: "mc", languages: &["fr", "en", "it"], web_weight: 1.0 },
    CountryRecord { iso: "md", name: "Moldova", tld: "md", languages: &["ro", "ru", "gag", "tr"], web_weight: 3.0 },
    CountryRecord { iso: "me", name: "Montenegro", tld: "me", languages: &["sr", "hu", "bs", "sq", "hr", "rom"], web_weight: 2.0 },
    CountryRecord { iso: "mf", name: "Saint Martin", tld: "mf", languages: &["fr"], web_weight: 0.0 },
    CountryRecord { iso: "mg", name: "Madagascar", tld: "mg", languages: &["fr", "mg"], web_weight: 1.0 },
    CountryRecord { iso: "mh", name: "Marshall Islands", tld: "mh", languages: &["mh", "en"], web_weight: 0.0 },
    CountryRecord { iso: "mk", name: "North Macedonia", tld: "mk", languages: &["mk", "sq", "tr", "rmm", "sr"], web_weight: 3.0 },
    CountryRecord { iso: "ml", name: "Mali", tld: "ml", languages: &["fr", "bm"], web_weight: 1.0 },
    CountryRecord { iso: "mm", name: "Myanmar", tld: "mm", languages: &["my"], web_weight: 2.0 },
    CountryRecord { iso: "mn", name: "Mongolia", tld: "mn", languages: &["mn", "ru"], web_weight: 2.0 },
    CountryRecord { iso: "mo", name: "Macao", tld: "mo", languages: &["zh", "pt"], web_weight: 2.0 },
    CountryRecord { iso: "mp", name: "Northern Mariana Islands", tld: "mp", languages: &["fil", "tl", "zh", "ch", "en"], web_weight: 0.0 },
    CountryRecord { iso: "mq", name: "Martinique", tld: "mq", languages: &["fr"], web_weight: 1.0 },
    CountryRecord { iso: "mr", name: "Mauritania", tld: "mr", languages: &["ar", "fuc", "snk", "fr", "mey", "wo"], web_weight: 1.0 },
    CountryRecord { iso: "ms", name: "Montserrat", tld: "ms", languages: &["en"], web_weight: 0.0 },
    CountryRecord { iso: "mt", name: "Malta", tld: "mt", languages: &["mt", "en"], web_weight: 3.0 },
    CountryRecord { iso: "mu", name: "Mauritius", tld: "mu", languages: &["en", "fr"], web_weight: 2.0 },
    CountryRecord { iso: "mv", name: "Maldives", tld: "mv", languages: &["dv", "en"], web_weight: 1.0 },
    CountryRecord { iso: "mw", name: "Malawi", tld: "mw", languages: &["ny", "yao", "tum", "swk"], web_weight: 1.0 },
    CountryRecord { iso: "mx", name: "Mexico", tld: "mx", languages: &["es"], web_weight: 120.0 },
    CountryRecord { iso: "my", name: "Malaysia", tld: "my", languages: &["ms", "en", "zh", "ta", "te", "ml", "pa", "th"], web_weight: 30.0 },
    CountryRecord { iso: "mz", name: "Mozambique", tld: "mz", languages: &["pt", "vmw"], web_weight: 1.0 },
    CountryRecord { iso: "na", name: "Namibia", tld: "na", languages: &["en", "af", "de", "hz", "naq"], web_weight: 1.0 },
    CountryRecord { iso: "nc", name: "New Caledonia", tld: "nc", languages: &["fr"], web_weight: 1.0 },
    CountryRecord { iso: "ne", name: "Niger", tld: "ne", languages: &["fr", "ha", "kr", "dyu"], web_weight: 1.0 },
    CountryRecord { iso: "nf", name: "Norfolk Island", tld: "nf", languages: &["en"], web_weight: 0.0 },
    CountryRecord { iso: "ng", name: "Nigeria", tld: "ng", languages: &["en", "ha", "yo", "ig", "ff"], web_weight: 15.0 },
    CountryRecord { iso: "ni", name: "Nicaragua", tld: "ni", languages: &["es", "en"], web_weight: 2.0 },
    CountryRecord { iso: "nl", name: "Netherlands", tld: "nl", languages: &["nl", "fy"], web_weight: 350.0 },
    CountryRecord { iso: "no", name: "Norway", tld: "no", languages: &["no", "nb", "nn", "se", "fi"], web_weight: 80.0 },
    CountryRecord { iso: "np", name: "Nepal", tld: "np", languages: &["ne", "en"], web_weight: 4.0 },
    CountryRecord { iso: "nr", name: "Nauru", tld: "nr", languages: &["na", "en"], web_weight: 0.0 },
    CountryRecord { iso: "nu", name: "Niue", tld: "nu", languages: &["niu", "en"], web_weight: 0.0 },
    CountryRecord { iso: "nz", name: "New Zealand", tld: "nz", languages: &["en", "mi"], web_weight: 70.0 },
    CountryRecord { iso: "om", name: "Oman", tld: "om", languages: &["ar", "en", "bal", "ur"], web_weight: 3.0 },
    CountryRecord { iso: "pa", name: "Panama", tld: "pa", languages: &["es", "en"], web_weight: 4.0 },
    CountryRecord { iso: "pe", name: "Peru", tld: "pe", languages: &["es", "qu", "ay"], web_weight: 25.0 },
    CountryRecord { iso: "pf", name: "French Polynesia", tld: "pf", languages: &["fr", "ty"], web_weight: 1.0 },
    CountryRecord { iso: "pg", name: "Papua New Guinea", tld: "pg", languages: &["en", "ho", "meu", "tpi"], web_weight: 1.0 },
    CountryRecord { iso: "ph", name: "Philippines", tld: "ph", languages: &["tl", "en", "fil"], web_weight: 40.0 },
    CountryRecord { iso: "pk", name: "Pakistan", tld: "pk", languages: &["ur", "en", "pa", "sd", "ps", "brh"], web_weight: 20.0 },
    CountryRecord { iso: "pl", name: "Poland", tld: "pl", languages: &["pl"], web_weight: 200.0 },
    CountryRecord { iso: "pm", name: "Saint Pierre and Miquelon", tld: "pm", languages: &["fr"], web_weight: 0.0 },
    CountryRecord { iso: "pn", name: "Pitcairn", tld: "pn", languages: &["en"], web_weight: 0.0 },
    CountryRecord { iso: "pr", name: "Puerto Rico", tld: "pr", languages: &["en", "es"], web_weight: 5.0 },
    CountryRecord { iso: "ps", name: "Palestinian Territory", tld: "ps", languages: &["ar"], web_weight: 2.0 },
    CountryRecord { iso: "pt", name: "Portugal", tld: "pt", languages: &["pt", "mwl"], web_weight: 60.0 },
    CountryRecord { iso: "pw", name: "Palau", tld: "pw", languages: &["pau", "sov", "en", "tox", "ja", "fil", "zh"], web_weight: 0.0 },
    CountryRecord { iso: "py", name: "Paraguay", tld: "py", languages: &["es", "gn"], web_weight: 3.0 },
    CountryRecord { iso: "qa", name: "Qatar", tld: "qa", languages: &["ar", "es"], web_weight: 5.0 },
    CountryRecord { iso: "re", name: "Reunion", tld: "re", languages: &["fr"], web_weight: 1.0 },
    CountryRecord { iso: "ro", name: "Romania", tld: "ro", languages: &["ro", "hu", "rom"], web_weight: 50.0 },
    CountryRecord { iso: "rs", name: "Serbia", tld: "rs", languages: &["sr", "hu", "bs", "rom"], web_weight: 15.0 },
    CountryRecord { iso: "ru", name: "Russia", tld: "ru", languages: &["ru", "tt", "xal", "cau", "ady", "kv", "ce", "tyv", "cv", "udm", "tut", "mns", "bua", "myv", "mdf", "chm", "ba", "inh", "kbd", "krc", "av", "sah", "nog"], web_weight: 500.0 },
    CountryRecord { iso: "rw", name: "Rwanda", tld: "rw", languages: &["rw", "en", "fr", "sw"], web_weight: 1.0 },
    CountryRecord { iso: "sa", name: "Saudi Arabia", tld: "sa", languages: &["ar"], web_weight: 30.0 },
    CountryRecord { iso: "sb", name: "Solomon Islands", tld: "sb", languages: &["en", "tpi"], web_weight: 0.0 },
    CountryRecord { iso: "sc", name: "Seychelles", tld: "sc", languages: &["en", "fr"], web_weight: 1.0 },
    CountryRecord { iso: "sd", name: "Sudan", tld: "sd", languages: &["ar", "en", "fia"], web_weight: 2.0 },
    CountryRecord { iso: "se", name: "Sweden", tld: "se", languages: &["sv", "se", "sma", "fi"], web_weight: 150.0 },
    CountryRecord { iso: "sg", name: "Singapore", tld: "sg", languages: &["cmn", "en", "ms", "ta", "zh"], web_weight: 60.0 },
    CountryRecord { iso: "sh", name: "Saint Helena", tld: "sh", languages: &["en"], web_weight: 0.0 },
    CountryRecord { iso: "si", name: "Slovenia", tld: "si", languages: &["sl", "sh"], web_weight: 15.0 },
    CountryRecord { iso: "sj", name: "Svalbard and Jan Mayen", tld: "sj", languages: &["no", "ru"], web_weight: 0.0 },
    CountryRecord { iso: "sk", name: "Slovakia", tld: "sk", languages: &["sk", "hu"], web_weight: 25.0 },
    CountryRecord { iso: "sl", name: "Sierra Leone", tld: "sl", languages: &["en", "men", "tem"], web_weight: 1.0 },
    CountryRecord { iso: "sm", name: "San Marino", tld: "sm", languages: &["it"], web_weight: 1.0 },
    CountryRecord { iso: "sn", name: "Senegal", tld: "sn", languages: &["fr", "wo", "fuc", "mnk"], web_weight: 2.0 },
    CountryRecord { iso: "so", name: "Somalia", tld: "so", languages: &["so", "ar", "it", "en"], web_weight: 1.0 },
    CountryRecord { iso: "sr", name: "Suriname", tld: "sr", languages: &["nl", "en", "srn", "hns", "jv"], web_weight: 1.0 },
    CountryRecord { iso: "ss", name: "South Sudan", tld: "ss", languages: &["en"], web_weight: 1.0 },
    CountryRecord { iso: "st", name: "Sao Tome and Principe", tld: "st", languages: &["pt"], web_weight: 0.0 },
    CountryRecord { iso: "sv", name: "El Salvador", tld: "sv", languages: &["es"], web_weight: 2.0 },
    CountryRecord { iso: "sx", name: "Sint Maarten", tld: "sx", languages: &["nl", "en"], web_weight: 0.0 },
    CountryRecord { iso: "sy", name: "Syria", tld: "sy", languages: &["ar", "ku", "hy", "arc", "fr", "en"], web_weight: 3.0 },
    CountryRecord { iso: "sz", name: "Eswatini", tld: "sz", languages: &["en", "ss"], web_weight: 1.0 },
    CountryRecord { iso: "tc", name: "Turks and Caicos Islands", tld: "tc", languages: &["en"], web_weight: 0.0 },
    CountryRecord { iso: "td", name: "Chad", tld: "td", languages: &["fr", "ar", "sara"], web_weight: 1.0 },
    CountryRecord { iso: "tf", name: "French Southern Territories", tld: "tf", languages: &["fr"], web_weight: 0.0 },
    CountryRecord { iso: "tg", name: "Togo", tld: "tg", languages: &["fr", "ee", "hna", "kbp", "dag", "ha"], web_weight: 1.0 },
    CountryRecord { iso: "th", name: "Thailand", tld: "th", languages: &["th", "en"], web_weight: 50.0 },
    CountryRecord { iso: "tj", name: "Tajikistan", tld: "tj", languages: &["tg", "ru"], web_weight: 1.0 },
    CountryRecord { iso: "tk", name: "Tokelau", tld: "tk", languages: &["tkl", "en"], web_weight: 0.0 },
    CountryRecord { iso: "tl", name: "Timor Leste", tld: "tl", languages: &["tet", "pt", "id", "en"], web_weight: 0.0 },
    CountryRecord { iso: "tm", name: "Turkmenistan", tld: "tm", languages: &["tk", "ru", "uz"], web_weight: 1.0 },
    CountryRecord { iso: "tn", name: "Tunisia", tld: "tn", languages: &["ar", "fr"], web_weight: 5.0 },
    CountryRecord { iso: "to", name: "Tonga", tld: "to", languages: &["to", "en"], web_weight: 0.0 },
    CountryRecord { iso: "tr", name: "Turkey", tld: "tr", languages: &["tr", "ku", "diq", "az", "av"], web_weight: 120.0 },
    CountryRecord { iso: "tt", name: "Trinidad and Tobago", tld: "tt", languages: &["en", "fr", "es", "zh"], web_weight: 2.0 },
    CountryRecord { iso: "tv", name: "Tuvalu", tld: "tv", languages: &["tvl", "en", "sm", "gil"], web_weight: 0.0 },
    CountryRecord { iso: "tw", name: "Taiwan", tld: "tw", languages: &["zh"], web_weight: 80.0 },
    CountryRecord { iso: "tz", name: "Tanzania", tld: "tz", languages: &["sw", "en", "ar"], web_weight: 3.0 },
    CountryRecord { iso: "ua", name: "Ukraine", tld: "ua", languages: &["uk", "ru", "rom", "pl", "hu"], web_weight: 60.0 },
    CountryRecord { iso: "ug", name: "Uganda", tld: "ug", languages: &["en", "lg", "sw", "ar"], web_weight: 2.0 },
    CountryRecord { iso: "um", name: "United States Minor Outlying Islands", tld: "um", languages: &["en"], web_weight: 0.0 },
    CountryRecord { iso: "us", name: "United States", tld: "us", languages: &["en", "es", "haw", "fr"], web_weight: 4000.0 },
    CountryRecord { iso: "uy", name: "Uruguay", tld: "uy", languages: &["es"], web_weight: 10.0 },
    CountryRecord { iso: "uz", name: "Uzbekistan", tld: "uz", languages: &["uz", "ru", "tg"], web_weight: 3.0 },
    CountryRecord { iso: "va", name: "Vatican", tld: "va", languages: &["la", "it", "fr"], web_weight: 1.0 },
    CountryRecord { iso: "vc", name: "Saint Vincent and the Grenadines", tld: "vc", languages: &["en", "fr"], web_weight: 0.0 },
    CountryRecord { iso: "ve", name: "Venezuela", tld: "ve", languages: &["es"], web_weight: 15.0 },
    CountryRecord { iso: "vg", name: "British Virgin Islands", tld: "vg", languages: &["en"], web_weight: 1.0 },
    CountryRecord { iso: "vi", name: "U.S. Virgin Islands", tld: "vi", languages: &["en"], web_weight: 1.0 },
    CountryRecord { iso: "vn", name: "Vietnam", tld: "vn", languages: &["vi", "en", "fr", "zh", "km"], web_weight: 40.0 },
    CountryRecord { iso: "vu", name: "Vanuatu", tld: "vu", languages: &["bi", "en", "fr"], web_weight: 0.0 },
    CountryRecord { iso: "wf", name: "Wallis and Futuna", tld: "wf", languages: &["wls", "fud", "fr"], web_weight: 0.0 },
    CountryRecord { iso: "ws", name: "Samoa", tld: "ws", languages: &["sm", "en"], web_weight: 0.0 },
    CountryRecord { iso: "xk", name: "Kosovo", tld: "xk", languages: &["sq", "sr"], web_weight: 1.0 },
    CountryRecord { iso: "ye", name: "Yemen", tld: "ye", languages: &["ar"], web_weight: 2.0 },
    CountryRecord { iso: "yt", name: "Mayotte", tld: "yt", languages: &["fr"], web_weight: 0.0 },
    CountryRecord { iso: "za", name: "South Africa", tld: "za", languages: &["zu", "xh", "af", "nso", "en", "tn", "st", "ts", "ss", "ve", "nr"], web_weight: 60.0 },
    CountryRecord { iso: "zm", name: "Zambia", tld: "zm", languages: &["en", "bem", "loz", "lun", "lue", "ny", "toi"], web_weight: 1.0 },
    CountryRecord { iso: "zw", name: "Zimbabwe", tld: "zw", languages: &["en", "sn", "nr", "nd"], web_weight: 2.0 },
];
