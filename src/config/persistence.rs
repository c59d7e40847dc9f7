//! Chart document persistence configuration

pub struct DocumentPersistenceConfig {
    /// Current version of the chart document format
    pub version: u32,
    /// Extension appended by `document_filename`
    pub extension: &'static str,
    /// Name given to documents created without one
    pub default_name: &'static str,
}

pub struct PersistenceConfig {
    pub document: DocumentPersistenceConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    document: DocumentPersistenceConfig {
        version: 1,
        extension: "chart.json",
        default_name: "Untitled",
    },
};

/// Example: "My Chart" -> "my_chart.chart.json"
pub fn document_filename(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let stem = if stem.is_empty() {
        PERSISTENCE.document.default_name.to_ascii_lowercase()
    } else {
        stem
    };
    format!("{}.{}", stem, PERSISTENCE.document.extension)
}
