//! Static excerpt corpora used across harnesses.

use folio_core::Excerpt;

/// (id, author, work, body)
pub const CORPUS: &[(i64, &str, &str, &str)] = &[
    (1, "Virginia Woolf", "The Waves", "I have made up thousands of stories"),
    (2, "Jorge Luis Borges", "Ficciones", "The universe (which others call the Library)"),
    (3, "Virginia Woolf", "Orlando", "Clothes are but a symbol of something hid deep beneath"),
    (4, "Italo Calvino", "Invisible Cities", "Cities, like dreams, are made of desires and fears"),
    (5, "Jorge Luis Borges", "Labyrinths", "Time forks perpetually toward innumerable futures"),
];

pub fn corpus() -> Vec<Excerpt> {
    CORPUS
        .iter()
        .map(|&(id, author, work, body)| Excerpt::new(id, author, work, body))
        .collect()
}

/// The corpus serialized the way a seed file stores it.
pub fn corpus_seed_json() -> String {
    serde_json::to_string_pretty(&corpus()).expect("corpus must serialize")
}

/// Write the corpus seed into `dir` and return its path.
pub fn write_seed(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("seed.json");
    std::fs::write(&path, corpus_seed_json()).expect("seed file must be writable");
    path
}
