//! Shared fixtures: a stand-in `tesseract` executable that replays canned
//! txt/hOCR output stored next to each input image.

#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Read;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use ocrdoc::pipeline::PipelineConfig;

/// PNG signature plus the start of an IHDR chunk; enough for sniffing.
pub const PNG_MAGIC: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D, b'I', b'H', b'D', b'R',
];

const FAKE_TESSERACT: &str = r#"#!/bin/sh
# usage: tesseract IMAGE OUTBASE [options...] txt hocr
echo "$@" >> "$1.calls"
if [ -f "$1.fail" ]; then
    cat "$1.fail" >&2
    exit 1
fi
cp "$1.fixture.txt" "$2.txt" && cp "$1.fixture.hocr" "$2.hocr"
"#;

/// Test environment with a fake tesseract and an installed trained-data dir.
pub struct OcrFixture {
    pub dir: tempfile::TempDir,
    pub tesseract: PathBuf,
    pub tessdata: PathBuf,
}

impl OcrFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();

        let tesseract = dir.path().join("fake-tesseract");
        fs::write(&tesseract, FAKE_TESSERACT).unwrap();
        fs::set_permissions(&tesseract, fs::Permissions::from_mode(0o755)).unwrap();

        let tessdata = dir.path().join("tessdata-main");
        fs::create_dir_all(&tessdata).unwrap();
        fs::write(tessdata.join("eng.traineddata"), b"").unwrap();

        Self {
            dir,
            tesseract,
            tessdata,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            tessdata_dir: self.tessdata.clone(),
            language: "eng".to_string(),
            tesseract: self.tesseract.clone(),
        }
    }
}

/// Write a fake image and the OCR output the fake engine reports for it.
pub fn write_image(path: &Path, raw_text: &str, words: &[(&str, Option<u32>)]) {
    fs::write(path, PNG_MAGIC).unwrap();
    write_fixture(path, raw_text, words);
}

/// Write only the canned OCR output for an image path.
pub fn write_fixture(path: &Path, raw_text: &str, words: &[(&str, Option<u32>)]) {
    fs::write(sidecar(path, "fixture.txt"), raw_text).unwrap();
    fs::write(sidecar(path, "fixture.hocr"), hocr(words)).unwrap();
}

/// Make the fake engine fail for this image with the given stderr.
pub fn fail_image(path: &Path, stderr: &str) {
    fs::write(path, PNG_MAGIC).unwrap();
    fs::write(sidecar(path, "fail"), stderr).unwrap();
}

/// Recorded engine invocations for an image, one argument line per run.
pub fn calls(path: &Path) -> Vec<String> {
    fs::read_to_string(sidecar(path, "calls"))
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

fn sidecar(image: &Path, suffix: &str) -> PathBuf {
    let mut name = image.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Render a one-line hOCR page for the given words.
pub fn hocr(words: &[(&str, Option<u32>)]) -> String {
    let spans: String = words
        .iter()
        .enumerate()
        .map(|(i, (text, size))| {
            let fsize = size.map(|s| format!("; x_fsize {}", s)).unwrap_or_default();
            format!(
                "<span class='ocrx_word' id='word_1_{}' title='bbox 0 0 10 10; x_wconf 95{}'>{}</span>\n",
                i + 1,
                fsize,
                text
            )
        })
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <html xmlns=\"http://www.w3.org/1999/xhtml\"><head><title></title></head><body>\n\
         <div class='ocr_page' id='page_1' title='bbox 0 0 100 100'>\n\
         <span class='ocr_line' id='line_1_1' title='bbox 0 0 100 10'>\n{}</span>\n\
         </div></body></html>\n",
        spans
    )
}

/// Contents of `word/document.xml` inside a DOCX file.
pub fn docx_document_xml(path: &Path) -> String {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

/// Paragraph texts in a DOCX body, one entry per paragraph.
pub fn docx_paragraphs(path: &Path) -> Vec<String> {
    let xml = docx_document_xml(path);
    let paragraph = regex::Regex::new(r"(?s)<w:p[ >].*?</w:p>").unwrap();
    let text = regex::Regex::new(r"<w:t[^>]*>([^<]*)</w:t>").unwrap();
    paragraph
        .find_iter(&xml)
        .map(|p| {
            text.captures_iter(p.as_str())
                .map(|c| c[1].to_string())
                .collect::<String>()
        })
        .collect()
}

/// Every run size (`w:sz`, half-points) in a DOCX body.
pub fn docx_sizes(path: &Path) -> Vec<u32> {
    let xml = docx_document_xml(path);
    regex::Regex::new(r#"<w:sz w:val="(\d+)""#)
        .unwrap()
        .captures_iter(&xml)
        .map(|c| c[1].parse().unwrap())
        .collect()
}
