/// Writing system of a single character, as far as lyric styling cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Script {
    Latin,
    Hiragana,
    Katakana,
    Han,
    /// Whitespace and punctuation; joins whatever run surrounds it.
    Neutral,
    Other,
}

pub fn classify_script(c: char) -> Script {
    match c {
        'a'..='z' | 'A'..='Z' | '0'..='9' => Script::Latin,
        '\u{00C0}'..='\u{024F}' if c.is_alphabetic() => Script::Latin,
        '\u{FF10}'..='\u{FF19}' | '\u{FF21}'..='\u{FF3A}' | '\u{FF41}'..='\u{FF5A}' => {
            Script::Latin
        }
        '\u{3040}'..='\u{309F}' => Script::Hiragana,
        '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}' => {
            Script::Katakana
        }
        '\u{3005}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}' => Script::Han,
        _ if c.is_whitespace() || c.is_ascii_punctuation() => Script::Neutral,
        '\u{2010}'..='\u{206F}' | '\u{3000}'..='\u{303F}' | '\u{FF01}'..='\u{FF0F}' => {
            Script::Neutral
        }
        _ => Script::Other,
    }
}

/// Maximal run of consecutive characters sharing a class.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TextRun<C> {
    pub text: String,
    pub class: C,
    /// Index (in chars, not bytes) of the run's first character in the source text.
    pub char_start: usize,
}

impl<C> TextRun<C> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Run-length encode `text` by `classify`. Concatenating the runs yields `text`.
pub fn split_runs<C, F>(text: &str, classify: F) -> Vec<TextRun<C>>
where
    C: Copy + PartialEq,
    F: Fn(char) -> C,
{
    let mut runs: Vec<TextRun<C>> = Vec::new();
    for (i, c) in text.chars().enumerate() {
        let class = classify(c);
        match runs.last_mut() {
            Some(run) if run.class == class => run.text.push(c),
            _ => runs.push(TextRun {
                text: c.to_string(),
                class,
                char_start: i,
            }),
        }
    }
    runs
}

/// Script runs with [`Script::Neutral`] characters folded into the run they follow
/// (leading neutrals join the first real run). All-neutral text stays one neutral run.
pub fn script_runs(text: &str) -> Vec<TextRun<Script>> {
    let mut out: Vec<TextRun<Script>> = Vec::new();
    for run in split_runs(text, classify_script) {
        match out.last_mut() {
            Some(prev) if run.class == Script::Neutral || prev.class == run.class => {
                prev.text.push_str(&run.text);
            }
            Some(prev) if prev.class == Script::Neutral => {
                prev.text.push_str(&run.text);
                prev.class = run.class;
            }
            _ => out.push(run),
        }
    }
    out
}

/// Drop whitespace-only runs.
pub fn drop_blank<C>(runs: Vec<TextRun<C>>) -> Vec<TextRun<C>> {
    runs.into_iter().filter(|r| !r.is_blank()).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/text/runs.rs"]
mod tests;
