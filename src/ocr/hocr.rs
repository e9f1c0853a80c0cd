//! hOCR layout parsing.
//!
//! Tesseract's hOCR output marks every word as `<span class="ocrx_word">`
//! with layout properties packed into the `title` attribute, e.g.
//! `bbox 36 92 96 116; x_wconf 93; x_fsize 12`. With `hocr_font_info`
//! enabled the engine reports the word's point size as `x_fsize`.

use scraper::{Html, Selector};

use super::backend::{OcrError, OcrWord};

const WORD_SELECTOR: &str = "span.ocrx_word";

/// Parse all recognized words from an hOCR document.
pub fn parse_words(hocr: &str) -> Result<Vec<OcrWord>, OcrError> {
    let document = Html::parse_document(hocr);
    let selector = Selector::parse(WORD_SELECTOR)
        .map_err(|e| OcrError::OcrFailed(format!("invalid hOCR selector: {}", e)))?;

    let words = document
        .select(&selector)
        .map(|element| {
            let title = element.value().attr("title").unwrap_or("");
            OcrWord {
                text: element.text().collect::<String>(),
                point_size: title_property(title, "x_fsize").and_then(|v| v.parse().ok()),
                confidence: title_property(title, "x_wconf").and_then(|v| v.parse().ok()),
            }
        })
        .collect();

    Ok(words)
}

/// Look up a single-valued property in an hOCR `title` attribute.
fn title_property<'a>(title: &'a str, name: &str) -> Option<&'a str> {
    title.split(';').find_map(|prop| {
        let mut parts = prop.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some(key), Some(value)) if key == name => Some(value),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml" xml:lang="en" lang="en">
 <head><title></title></head>
 <body>
  <div class='ocr_page' id='page_1' title='image "in.png"; bbox 0 0 400 200; ppageno 0'>
   <span class='ocr_line' id='line_1_1' title="bbox 36 92 200 116; baseline 0 -4; x_size 24">
    <span class='ocrx_word' id='word_1_1' title='bbox 36 92 96 116; x_wconf 93; x_font Arial; x_fsize 12'>HELLO</span>
    <span class='ocrx_word' id='word_1_2' title='bbox 100 92 200 116; x_wconf 88.5; x_fsize 10'><strong>WORLD</strong></span>
    <span class='ocrx_word' id='word_1_3' title='bbox 210 92 220 116; x_wconf 40'>!</span>
   </span>
  </div>
 </body>
</html>"#;

    #[test]
    fn test_parse_words_reads_font_size_and_confidence() {
        let words = parse_words(SAMPLE).unwrap();
        assert_eq!(words.len(), 3);

        assert_eq!(words[0].text, "HELLO");
        assert_eq!(words[0].point_size, Some(12.0));
        assert_eq!(words[0].confidence, Some(93.0));

        assert_eq!(words[1].text, "WORLD");
        assert_eq!(words[1].point_size, Some(10.0));
        assert_eq!(words[1].confidence, Some(88.5));
    }

    #[test]
    fn test_word_without_font_info() {
        let words = parse_words(SAMPLE).unwrap();
        assert_eq!(words[2].text, "!");
        assert_eq!(words[2].point_size, None);
    }

    #[test]
    fn test_parse_words_empty_page() {
        let words = parse_words("<html><body><div class='ocr_page'></div></body></html>").unwrap();
        assert!(words.is_empty());
    }

    #[test]
    fn test_title_property() {
        let title = "bbox 1 2 3 4; x_wconf 90; x_fsize 11";
        assert_eq!(title_property(title, "x_fsize"), Some("11"));
        assert_eq!(title_property(title, "x_wconf"), Some("90"));
        assert_eq!(title_property(title, "x_font"), None);
    }
}
