mod document;

pub use document::ChartDocument;
