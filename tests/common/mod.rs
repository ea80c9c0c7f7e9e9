#![allow(dead_code)]

use lopdf::content::Content;
use lopdf::{Dictionary, Document as LopdfDocument, Object};
use std::collections::BTreeMap;
use tagpress::{PipelineBuilder, PipelineError, RenderPipeline};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

/// A pipeline with built-in fonts and default settings.
pub fn default_pipeline() -> Result<RenderPipeline, PipelineError> {
    PipelineBuilder::new().build()
}

/// One `Tj` with the text state in effect when it was shown.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: String,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub rgb: [f32; 3],
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    pub fn media_box(&self) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
        let page = self.first_page()?;
        let values = page.get(b"MediaBox")?.as_array()?;
        Ok(values.iter().filter_map(number).collect())
    }

    /// Resource name (`F1`..) to `BaseFont`.
    pub fn fonts(&self) -> Result<BTreeMap<String, String>, Box<dyn std::error::Error>> {
        let page = self.first_page()?;
        let resources = self.resolve_dict(page.get(b"Resources")?)?;
        let fonts = self.resolve_dict(resources.get(b"Font")?)?;
        let mut names = BTreeMap::new();
        for (name, value) in fonts.iter() {
            let font = self.resolve_dict(value)?;
            let base = font.get(b"BaseFont")?.as_name()?;
            names.insert(
                String::from_utf8_lossy(name).into_owned(),
                String::from_utf8_lossy(base).into_owned(),
            );
        }
        Ok(names)
    }

    /// The font dictionary registered under resource `name`.
    pub fn font_dict(&self, name: &str) -> Result<&Dictionary, Box<dyn std::error::Error>> {
        let page = self.first_page()?;
        let resources = self.resolve_dict(page.get(b"Resources")?)?;
        let fonts = self.resolve_dict(resources.get(b"Font")?)?;
        self.resolve_dict(fonts.get(name.as_bytes())?)
    }

    pub fn operators(&self) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        Ok(self
            .content()?
            .operations
            .into_iter()
            .map(|op| op.operator)
            .collect())
    }

    /// Replays the content stream and collects every shown string.
    pub fn text_runs(&self) -> Result<Vec<TextRun>, Box<dyn std::error::Error>> {
        let mut runs = Vec::new();
        let mut font = String::new();
        let mut size = 0.0;
        let mut rgb = [0.0; 3];
        let mut pos = (0.0, 0.0);
        for op in self.content()?.operations {
            let nums: Vec<f32> = op.operands.iter().filter_map(number).collect();
            match op.operator.as_str() {
                "Tf" => {
                    font = String::from_utf8_lossy(op.operands[0].as_name()?).into_owned();
                    size = nums[0];
                }
                "rg" => rgb = [nums[0], nums[1], nums[2]],
                "Td" => pos = (nums[0], nums[1]),
                "Tj" => {
                    let text = match &op.operands[0] {
                        Object::String(bytes, _) => bytes.iter().map(|&b| b as char).collect(),
                        other => return Err(format!("unexpected Tj operand {:?}", other).into()),
                    };
                    runs.push(TextRun {
                        text,
                        font: font.clone(),
                        size,
                        x: pos.0,
                        y: pos.1,
                        rgb,
                    });
                }
                _ => {}
            }
        }
        Ok(runs)
    }

    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }

    fn first_page(&self) -> Result<&Dictionary, Box<dyn std::error::Error>> {
        let (_, page_id) = self
            .doc
            .get_pages()
            .into_iter()
            .next()
            .ok_or("document has no pages")?;
        Ok(self.doc.get_object(page_id)?.as_dict()?)
    }

    fn content(&self) -> Result<Content, Box<dyn std::error::Error>> {
        let (_, page_id) = self
            .doc
            .get_pages()
            .into_iter()
            .next()
            .ok_or("document has no pages")?;
        let bytes = self.doc.get_page_content(page_id)?;
        Ok(Content::decode(&bytes)?)
    }

    pub fn resolve_dict<'a>(
        &'a self,
        object: &'a Object,
    ) -> Result<&'a Dictionary, Box<dyn std::error::Error>> {
        match object {
            Object::Reference(id) => Ok(self.doc.get_object(*id)?.as_dict()?),
            other => Ok(other.as_dict()?),
        }
    }
}

pub fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

/// Renders `text` with `pipeline` and loads the result back.
pub fn render(pipeline: &RenderPipeline, text: &str) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    GeneratedPdf::from_bytes(pipeline.render(text)?)
}
