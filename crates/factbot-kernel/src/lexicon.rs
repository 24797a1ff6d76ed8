//! Per-language word lists driving the extraction cascade.
//!
//! Everything language-specific lives here: the connective particle
//! ("'s" / "的"), the "is" particle, the canonical question patterns, the
//! interrogative words, the relation keywords, the seed relations and the
//! manual-entry prompt labels. The extraction code itself never mentions a
//! concrete word.

use factbot_types::config::Language;

/// How the head of a possessive subject is measured when deciding whether
/// to strip the trailing particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentMeasure {
    /// Unicode scalar values. Suits scripts without word spacing.
    Chars,
    /// Whitespace-separated words.
    Words,
}

impl SegmentMeasure {
    pub fn measure(self, text: &str) -> usize {
        match self {
            SegmentMeasure::Chars => text.trim().chars().count(),
            SegmentMeasure::Words => text.split_whitespace().count(),
        }
    }

    /// Byte offset of the first occurrence of `term` in `text`.
    ///
    /// With `Words`, an occurrence whose alphanumeric edge touches another
    /// alphanumeric character is skipped, so "is" never matches inside
    /// "Elvis". Edges that are punctuation or space ("'s what") match as is.
    pub fn find(self, text: &str, term: &str) -> Option<usize> {
        if term.is_empty() {
            return None;
        }
        match self {
            SegmentMeasure::Chars => text.find(term),
            SegmentMeasure::Words => text
                .match_indices(term)
                .map(|(idx, _)| idx)
                .find(|&idx| on_word_boundary(text, idx, term)),
        }
    }
}

fn on_word_boundary(text: &str, idx: usize, term: &str) -> bool {
    let alnum = |c: Option<char>| c.is_some_and(char::is_alphanumeric);
    let end = idx + term.len();
    let left_open = !alnum(term.chars().next()) || !alnum(text[..idx].chars().next_back());
    let right_open = !alnum(term.chars().next_back()) || !alnum(text[end..].chars().next());
    left_open && right_open
}

/// Labels shown when the user has to spell out a fact by hand.
#[derive(Debug, Clone, Copy)]
pub struct PromptLabels {
    pub subject: &'static str,
    pub relation: &'static str,
    pub object: &'static str,
}

/// Word lists for one question language.
#[derive(Debug)]
pub struct Lexicon {
    pub language: Language,
    /// Possessive connective between an entity and its attribute.
    pub particle: &'static str,
    /// The copula; also the relation of last resort.
    pub is_particle: &'static str,
    pub measure: SegmentMeasure,
    /// Longest head (in `measure` units) whose trailing particle is stripped.
    pub compound_head_max: usize,
    /// Leading politeness/interrogative prefixes removed before matching.
    /// Compared ASCII case-insensitively.
    pub question_prefixes: &'static [&'static str],
    /// `(pattern, relation)` pairs for "X is what" style questions.
    pub question_patterns: &'static [(&'static str, &'static str)],
    /// Interrogative and stop words, in split priority order.
    pub interrogatives: &'static [&'static str],
    /// `(keyword, fallback relation)` pairs, in priority order.
    pub relation_keywords: &'static [(&'static str, &'static str)],
    /// Built-in relation phrases, merged into every vocabulary.
    pub seed_relations: &'static [&'static str],
    pub prompts: PromptLabels,
}

pub static ENGLISH: Lexicon = Lexicon {
    language: Language::En,
    particle: "'s",
    is_particle: "is",
    measure: SegmentMeasure::Words,
    compound_head_max: 2,
    question_prefixes: &[
        "do you know ",
        "tell me ",
        "what is ",
        "what's ",
        "what are ",
        "who is ",
        "who's ",
        "who are ",
        "which is ",
    ],
    question_patterns: &[
        (" is what", "is"),
        (" is who", "is"),
        ("'s what", "is"),
        ("'s who", "is"),
    ],
    interrogatives: &["is", "what", "who", "which", "how many", "how"],
    relation_keywords: &[
        ("is what", "is"),
        ("is who", "is"),
        ("is", "is"),
        ("belongs to", "belongs to"),
        ("comes from", "comes from"),
        ("developed", "developed"),
        ("created", "created"),
        ("proposed", "proposed"),
        ("invented", "invented"),
        ("abbreviation", "abbreviation"),
    ],
    seed_relations: &[
        "abbreviation",
        "founder",
        "developer",
        "is",
        "proposed",
        "invented",
        "created",
        "belongs to",
        "comes from",
        "color",
        "size",
        "weight",
        "length",
        "width",
        "height",
        "age",
        "birthday",
        "nationality",
        "occupation",
        "company",
        "school",
        "city",
        "country",
        "capital",
        "language",
        "currency",
        "population",
        "area",
        "GDP",
        "president",
        "prime minister",
        "dynasty",
        "year",
        "period",
        "era",
    ],
    prompts: PromptLabels {
        subject: "Subject (e.g. Python): ",
        relation: "Relation (e.g. founder): ",
        object: "Confirm the answer (e.g. Guido van Rossum): ",
    },
};

pub static CHINESE: Lexicon = Lexicon {
    language: Language::Zh,
    particle: "的",
    is_particle: "是",
    measure: SegmentMeasure::Chars,
    compound_head_max: 2,
    question_prefixes: &["请问"],
    question_patterns: &[
        ("是什么", "是"),
        ("是谁", "是"),
        ("的什么", "是"),
        ("的谁", "是"),
    ],
    interrogatives: &["是", "什么", "谁", "哪", "哪一", "多少", "几", "怎么", "如何"],
    relation_keywords: &[
        ("是什么", "是"),
        ("是谁", "是"),
        ("是", "是"),
        ("属于", "属于"),
        ("来自", "来自"),
        ("开发", "开发"),
        ("创建", "创建"),
        ("提出", "提出"),
        ("发明", "发明"),
        ("英文缩写", "英文缩写"),
    ],
    seed_relations: &[
        "英文缩写", "创始人", "开发者", "是", "提出", "发明", "创建", "属于", "来自", "颜色",
        "大小", "重量", "长度", "宽度", "高度", "年龄", "生日", "国籍", "职业", "公司", "学校",
        "城市", "国家", "首都", "语言", "货币", "人口", "面积", "GDP", "总统", "总理", "朝代",
        "年份", "时期", "时代",
    ],
    prompts: PromptLabels {
        subject: "请输入实体（例如：Python）：",
        relation: "请输入关系（例如：创始人）：",
        object: "请确认答案（例如：吉多·范罗苏姆）：",
    },
};

impl Lexicon {
    /// The built-in lexicon for `language`.
    pub fn for_language(language: Language) -> &'static Lexicon {
        match language {
            Language::En => &ENGLISH,
            Language::Zh => &CHINESE,
        }
    }

    /// Canonical form of a raw question: trimmed, curly apostrophes folded,
    /// trailing question/exclamation marks dropped and at most one leading
    /// prefix removed.
    pub fn normalize(&self, question: &str) -> String {
        let folded = question.replace(['\u{2019}', '\u{2018}'], "'");
        let mut text = folded
            .trim()
            .trim_end_matches(['?', '？', '!', '！', ' '])
            .trim();

        for prefix in self.question_prefixes {
            let Some(head) = text.get(..prefix.len()) else {
                continue;
            };
            if head.eq_ignore_ascii_case(prefix) {
                let rest = text[prefix.len()..].trim();
                if !rest.is_empty() {
                    text = rest;
                }
                break;
            }
        }
        text.to_string()
    }

    /// Position of `term` in `text`, honouring word boundaries for
    /// space-delimited languages.
    pub fn find_term(&self, text: &str, term: &str) -> Option<usize> {
        self.measure.find(text, term)
    }

    pub fn contains_term(&self, text: &str, term: &str) -> bool {
        self.find_term(text, term).is_some()
    }

    /// Drop a trailing particle from a short possessive subject
    /// ("China's" → "China"), keeping compound subjects verbatim.
    ///
    /// The particle is stripped only when it occurs exactly once and the head
    /// before it measures at most `compound_head_max`.
    pub fn trim_particle<'a>(&self, candidate: &'a str) -> &'a str {
        let candidate = candidate.trim();
        if !candidate.ends_with(self.particle) || candidate == self.particle {
            return candidate;
        }
        if candidate.matches(self.particle).count() > 1 {
            return candidate;
        }
        let head = &candidate[..candidate.len() - self.particle.len()];
        if self.measure.measure(head) > self.compound_head_max {
            return candidate;
        }
        head.trim()
    }
}
