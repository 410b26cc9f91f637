//! Page language detection
//!
//! Sources, most reliable first:
//! 1. the `<html lang="..">` attribute
//! 2. the `Content-Language` response header
//! 3. the visible text: writing system for non-Latin scripts, otherwise
//!    stop-word frequencies with a minimum confidence

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Minimum share of the two best stop-word scores held by the winner
pub const MIN_CONFIDENCE: f64 = 0.6;

/// Minimum stop-word hits before text detection answers at all
pub const MIN_STOPWORD_HITS: usize = 3;

/// Minimum share of letters in one non-Latin script to decide by script
const MIN_SCRIPT_SHARE: f64 = 0.3;

/// Characters of page text examined
const MAX_TEXT_CHARS: usize = 100_000;

/// Where the detected language came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    HtmlAttribute,
    ContentLanguageHeader,
    Script,
    Stopwords,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedLanguage {
    /// ISO 639-1 code (lowercase)
    pub code: String,
    pub source: DetectionSource,
    /// 1.0 for declared languages
    pub confidence: f64,
}

impl DetectedLanguage {
    fn declared(code: String, source: DetectionSource) -> Self {
        Self {
            code,
            source,
            confidence: 1.0,
        }
    }
}

static HTML_LANG: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r#"(?is)<html\b[^>]*?\blang\s*=\s*["']?\s*([a-z]{2,3}(?:[-_][a-z0-9]+)*)"#).ok()
});

static INVISIBLE_BLOCKS: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b.*?</script>|<style\b.*?</style>|<!--.*?-->").ok()
});

static TAGS: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?s)<[^>]+>").ok());

const STOPWORDS: &[(&str, &[&str])] = &[
    ("en", &["the", "and", "of", "to", "is", "that", "for", "with", "this", "are", "was", "have", "from", "you", "which", "will", "be", "by", "not", "or"]),
    ("de", &["der", "die", "und", "das", "ist", "nicht", "mit", "sich", "auf", "für", "ein", "eine", "dem", "den", "des", "auch", "wird", "sind", "oder", "werden"]),
    ("fr", &["le", "la", "les", "et", "est", "des", "une", "du", "dans", "pour", "qui", "sur", "pas", "avec", "sont", "au", "aux", "nous", "vous", "cette"]),
    ("es", &["el", "los", "las", "del", "por", "con", "una", "para", "es", "está", "como", "más", "pero", "sus", "al", "son", "también", "fue", "se", "y"]),
    ("it", &["il", "di", "che", "della", "per", "non", "sono", "gli", "nel", "alla", "anche", "questo", "più", "dei", "delle", "è", "ma", "si", "lo", "ed"]),
    ("pt", &["o", "os", "da", "do", "das", "dos", "não", "em", "uma", "para", "com", "é", "mais", "mas", "foi", "ao", "pelo", "são", "também", "você"]),
    ("nl", &["de", "het", "een", "van", "en", "niet", "dat", "op", "voor", "met", "zijn", "aan", "ook", "wordt", "naar", "bij", "maar", "deze", "worden", "uit"]),
    ("sv", &["och", "att", "det", "som", "för", "med", "är", "inte", "på", "av", "till", "den", "har", "ett", "om", "jag", "kan", "också", "eller", "vi"]),
    ("da", &["og", "at", "det", "som", "for", "med", "er", "ikke", "på", "af", "til", "den", "har", "et", "jeg", "der", "kan", "også", "eller", "vi"]),
    ("no", &["og", "er", "ikke", "på", "av", "til", "det", "som", "for", "med", "har", "en", "jeg", "kan", "også", "skal", "vil", "eller", "hva", "vi"]),
    ("fi", &["ja", "on", "ei", "että", "se", "oli", "hän", "mutta", "kun", "niin", "ovat", "tai", "myös", "joka", "kuin", "tämä", "voi", "jos", "sen", "vain"]),
    ("pl", &["i", "w", "z", "na", "się", "nie", "do", "to", "jest", "że", "jak", "od", "po", "ale", "dla", "są", "tak", "przez", "jego", "oraz"]),
    ("cs", &["a", "je", "se", "na", "v", "že", "to", "s", "z", "do", "jsou", "jako", "ale", "by", "pro", "jeho", "nebo", "také", "který", "byl"]),
    ("tr", &["ve", "bir", "bu", "da", "için", "ile", "çok", "daha", "olarak", "gibi", "olan", "ama", "kadar", "sonra", "değil", "ne", "var", "her", "mi", "ya"]),
    ("id", &["yang", "dan", "di", "ini", "itu", "dengan", "untuk", "dari", "tidak", "dalam", "akan", "pada", "adalah", "juga", "ke", "ada", "oleh", "atau", "kami", "karena"]),
    ("ru", &["и", "в", "не", "на", "что", "с", "по", "как", "это", "для", "он", "из", "к", "но", "от", "так", "все", "же", "было", "о"]),
    ("uk", &["і", "та", "в", "не", "на", "що", "з", "до", "як", "це", "для", "від", "але", "є", "його", "було", "він", "із", "також", "які"]),
];

static STOPWORD_SETS: Lazy<Vec<(&'static str, HashSet<&'static str>)>> = Lazy::new(|| {
    STOPWORDS
        .iter()
        .map(|(code, words)| (*code, words.iter().copied().collect()))
        .collect()
});

/// Writing systems that identify a language on their own
///
/// Declaration order breaks ties between equally frequent scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Script {
    Latin,
    Cyrillic,
    Hangul,
    Kana,
    Han,
    Greek,
    Hebrew,
    Arabic,
    Thai,
    Devanagari,
    Armenian,
    Georgian,
    Other,
}

impl Script {
    fn of(c: char) -> Self {
        match c as u32 {
            0x0041..=0x024F => Script::Latin,
            0x0370..=0x03FF | 0x1F00..=0x1FFF => Script::Greek,
            0x0400..=0x052F => Script::Cyrillic,
            0x0530..=0x058F => Script::Armenian,
            0x0590..=0x05FF => Script::Hebrew,
            0x0600..=0x06FF | 0x0750..=0x077F => Script::Arabic,
            0x0900..=0x097F => Script::Devanagari,
            0x0E00..=0x0E7F => Script::Thai,
            0x10A0..=0x10FF => Script::Georgian,
            0x1100..=0x11FF | 0x3130..=0x318F | 0xAC00..=0xD7AF => Script::Hangul,
            0x3040..=0x30FF | 0x31F0..=0x31FF => Script::Kana,
            0x3400..=0x4DBF | 0x4E00..=0x9FFF => Script::Han,
            _ => Script::Other,
        }
    }

    /// Language implied by a dominant script (Latin and Cyrillic need stop words)
    fn language(self) -> Option<&'static str> {
        match self {
            Script::Hangul => Some("ko"),
            Script::Kana => Some("ja"),
            Script::Han => Some("zh"),
            Script::Greek => Some("el"),
            Script::Hebrew => Some("he"),
            Script::Arabic => Some("ar"),
            Script::Thai => Some("th"),
            Script::Devanagari => Some("hi"),
            Script::Armenian => Some("hy"),
            Script::Georgian => Some("ka"),
            Script::Latin | Script::Cyrillic | Script::Other => None,
        }
    }
}

/// Primary subtag of a language tag (`en-US` → `en`), with legacy codes mapped
pub fn normalize_language_tag(tag: &str) -> Option<String> {
    let primary = tag
        .trim()
        .split(|c: char| c == '-' || c == '_')
        .next()?
        .to_lowercase();
    if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let code = match primary.as_str() {
        "iw" => "he",
        "in" => "id",
        "ji" => "yi",
        other => other,
    };
    Some(code.to_string())
}

/// Language declared by the `<html lang>` attribute
pub fn html_lang_attribute(html: &str) -> Option<String> {
    let regex = HTML_LANG.as_ref()?;
    let tag = regex.captures(html)?.get(1)?.as_str();
    normalize_language_tag(tag)
}

/// First language of a `Content-Language` header value
pub fn content_language(header: &str) -> Option<String> {
    header.split(',').find_map(normalize_language_tag)
}

/// Visible text of an HTML document
pub fn strip_html(html: &str) -> String {
    let without_blocks = match INVISIBLE_BLOCKS.as_ref() {
        Some(regex) => regex.replace_all(html, " "),
        None => html.into(),
    };
    let text = match TAGS.as_ref() {
        Some(regex) => regex.replace_all(&without_blocks, " ").into_owned(),
        None => without_blocks.into_owned(),
    };
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Detect the language of plain text
pub fn detect_text_language(text: &str) -> Option<DetectedLanguage> {
    let text: String = text.chars().take(MAX_TEXT_CHARS).collect();
    detect_by_script(&text).or_else(|| detect_by_stopwords(&text))
}

/// Detect the language of a fetched page
///
/// # Arguments
/// * `html` - Response body
/// * `content_language_header` - `Content-Language` header value, if any
pub fn detect_page_language(
    html: &str,
    content_language_header: Option<&str>,
) -> Option<DetectedLanguage> {
    if let Some(code) = html_lang_attribute(html) {
        return Some(DetectedLanguage::declared(code, DetectionSource::HtmlAttribute));
    }
    if let Some(code) = content_language_header.and_then(content_language) {
        return Some(DetectedLanguage::declared(code, DetectionSource::ContentLanguageHeader));
    }
    detect_text_language(&strip_html(html))
}

fn detect_by_script(text: &str) -> Option<DetectedLanguage> {
    let mut counts: BTreeMap<Script, usize> = BTreeMap::new();
    let mut letters = 0usize;
    for c in text.chars().filter(|c| c.is_alphabetic()) {
        letters += 1;
        *counts.entry(Script::of(c)).or_insert(0) += 1;
    }
    if letters == 0 {
        return None;
    }

    // Japanese mixes kana with kanji; any real share of kana decides it
    let kana = counts.get(&Script::Kana).copied().unwrap_or(0);
    let han = counts.get(&Script::Han).copied().unwrap_or(0);
    if kana > 0 && (kana + han) as f64 / letters as f64 >= MIN_SCRIPT_SHARE && kana * 10 >= han {
        return Some(DetectedLanguage {
            code: "ja".to_string(),
            source: DetectionSource::Script,
            confidence: (kana + han) as f64 / letters as f64,
        });
    }

    let (script, count) = counts
        .iter()
        .filter(|(script, _)| script.language().is_some())
        .max_by(|(a, x), (b, y)| x.cmp(y).then_with(|| b.cmp(a)))?;
    let share = *count as f64 / letters as f64;
    if share < MIN_SCRIPT_SHARE {
        return None;
    }
    Some(DetectedLanguage {
        code: script.language()?.to_string(),
        source: DetectionSource::Script,
        confidence: share,
    })
}

fn detect_by_stopwords(text: &str) -> Option<DetectedLanguage> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .collect();

    let mut scores: Vec<(&'static str, usize)> = STOPWORD_SETS
        .iter()
        .map(|(code, set)| (*code, words.iter().filter(|w| set.contains(*w)).count()))
        .collect();
    scores.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let (best_code, best) = *scores.first()?;
    let runner_up = scores.get(1).map(|s| s.1).unwrap_or(0);
    if best < MIN_STOPWORD_HITS {
        return None;
    }
    let confidence = best as f64 / (best + runner_up) as f64;
    if confidence < MIN_CONFIDENCE {
        return None;
    }
    Some(DetectedLanguage {
        code: best_code.to_string(),
        source: DetectionSource::Stopwords,
        confidence,
    })
}
