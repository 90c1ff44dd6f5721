// src/words/stopwords.rs
// =============================================================================
// Stop-word lists.
//
// Two kinds of words are dropped from the counts:
// - NOISE_WORDS: words that show up on the crawled sites because of their
//   layout (share buttons, pagination, catalog field labels, years)
// - language stop words: "the", "and", "de", "que", ...
// =============================================================================

use std::str::FromStr;

use serde::Deserialize;

/// Site furniture and catalog labels seen on the crawled blogs.
pub const NOISE_WORDS: &[&str] = &[
    "reply", "like", "share", "tweet", "says", "comments", "i'm", "it's", "you're", "we're",
    "|", "don't", "comment", "buy", "contact", "open", "google", "maps", "positive",
    "feedback", "email", "hi", "-", "etc", "twitter", "libro", "libros", "tig", "página",
    "páginas", "anterior", "siguiente", "ficha", "empty", "nº", "2021", "2020", "2019",
    "2018", "2017", "2016", "2015", "2014", "2013", "2012", "2011", "2010", "octubre", "16",
    "gratis", "correo", "electrónico", "nosolosig", "autor/a", "editorial", "país", "fecha",
    "edición", "precio", "isbn", "idioma", "euros", "español", "españa",
];

const ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can't", "cannot", "could", "couldn't", "did",
    "didn't", "do", "does", "doesn't", "doing", "don't", "down", "during", "each", "few",
    "for", "from", "further", "had", "hadn't", "has", "hasn't", "have", "haven't",
    "having", "he", "he'd", "he'll", "he's", "her", "here", "here's", "hers", "herself",
    "him", "himself", "his", "how", "how's", "i", "i'd", "i'll", "i'm", "i've", "if",
    "in", "into", "is", "isn't", "it", "it's", "its", "itself", "let's", "me", "more",
    "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on", "once",
    "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own",
    "same", "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so",
    "some", "such", "than", "that", "that's", "the", "their", "theirs", "them",
    "themselves", "then", "there", "there's", "these", "they", "they'd", "they'll",
    "they're", "they've", "this", "those", "through", "to", "too", "under", "until",
    "up", "very", "was", "wasn't", "we", "we'd", "we'll", "we're", "we've", "were",
    "weren't", "what", "what's", "when", "when's", "where", "where's", "which", "while",
    "who", "who's", "whom", "why", "why's", "with", "won't", "would", "wouldn't", "you",
    "you'd", "you'll", "you're", "you've", "your", "yours", "yourself", "yourselves",
];

const SPANISH: &[&str] = &[
    "a", "al", "algo", "algunas", "algunos", "ante", "antes", "como", "con", "contra",
    "cual", "cuando", "de", "del", "desde", "donde", "durante", "e", "el", "ella",
    "ellas", "ellos", "en", "entre", "era", "erais", "eran", "eras", "eres", "es", "esa",
    "esas", "ese", "eso", "esos", "esta", "estaba", "estado", "estamos", "estar", "estas",
    "este", "esto", "estos", "estoy", "fue", "fueron", "fui", "ha", "han", "has", "hasta",
    "hay", "la", "las", "le", "les", "lo", "los", "más", "me", "mi", "mis", "mucho",
    "muchos", "muy", "nada", "ni", "no", "nos", "nosotros", "nuestra", "nuestro", "o",
    "os", "otra", "otras", "otro", "otros", "para", "pero", "poco", "por", "porque", "que",
    "quien", "quienes", "qué", "se", "sea", "ser", "si", "sido", "sin", "sobre", "son",
    "su", "sus", "sí", "también", "tanto", "te", "tiene", "tienen", "todo", "todos", "tu",
    "tus", "tú", "un", "una", "uno", "unos", "vosotros", "y", "ya", "yo", "él",
];

/// Language of the crawled content, selecting the stop-word list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    #[value(name = "en")]
    English,
    #[serde(rename = "es")]
    #[value(name = "es")]
    Spanish,
}

impl Language {
    pub fn stop_words(self) -> &'static [&'static str] {
        match self {
            Language::English => ENGLISH,
            Language::Spanish => SPANISH,
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "es" | "spanish" => Ok(Language::Spanish),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}
