use booktape::domain::document::DocumentFile;

/// Little-endian 16-bit PCM for `samples`
pub fn pcm_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|sample| sample.to_le_bytes()).collect()
}

/// `len` samples of a constant level
pub fn flat_pcm(level: i16, len: usize) -> Vec<u8> {
    pcm_bytes(&vec![level; len])
}

pub fn text_file(name: &str, contents: &str) -> DocumentFile {
    DocumentFile::new(name, contents.as_bytes().to_vec()).expect("Supported fixture file")
}

/// Bytes standing in for a PDF; never parsed locally
pub fn pdf_file() -> DocumentFile {
    DocumentFile::new("report.pdf", b"%PDF-1.4\n%fixture\n".to_vec()).expect("Supported fixture file")
}
