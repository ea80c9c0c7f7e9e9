use crate::helpers;
use crate::writer::PdfWriter;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, ObjectId};
use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;
use tagpress_layout::{FontFace, FontLibrary, PlacementCommand};
use tagpress_render_core::{DocumentRenderer, RenderError};
use tagpress_types::{Color, FontVariant};

/// A PDF renderer over lopdf that buffers the whole document in memory.
pub struct LopdfRenderer {
    writer: PdfWriter,
    font_dict: Dictionary,
    /// Resource name per variant; variants sharing a face share a name.
    font_names: BTreeMap<FontVariant, String>,
    page: Option<PageContext>,
    page_ids: Vec<ObjectId>,
}

impl LopdfRenderer {
    pub fn new(fonts: &FontLibrary) -> Self {
        let mut writer = PdfWriter::new("1.7");
        let mut font_dict = Dictionary::new();
        let mut font_names = BTreeMap::new();
        let mut registered: Vec<(&Arc<FontFace>, String)> = Vec::new();

        for (variant, face) in fonts.faces() {
            let existing = registered
                .iter()
                .find(|(known, _)| Arc::ptr_eq(known, face))
                .map(|(_, name)| name.clone());
            let name = match existing {
                Some(name) => name,
                None => {
                    let name = format!("F{}", registered.len() + 1);
                    let dict = helpers::font_dictionary(&mut writer, face);
                    let font_id = writer.add_object(dict);
                    font_dict.set(name.as_bytes(), Object::Reference(font_id));
                    debug!("Registered font {} as /{}", face.base_font_name(), name);
                    registered.push((face, name.clone()));
                    name
                }
            };
            font_names.insert(variant, name);
        }

        Self {
            writer,
            font_dict,
            font_names,
            page: None,
            page_ids: Vec::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len() + usize::from(self.page.is_some())
    }

    fn close_page(&mut self) -> Result<(), RenderError> {
        if let Some(page) = self.page.take() {
            let (width, height) = (page.width, page.height);
            let content_id = self.writer.write_content_stream(page.finish())?;
            let page_id = self.writer.write_page(content_id, width, height);
            self.page_ids.push(page_id);
        }
        Ok(())
    }
}

impl DocumentRenderer for LopdfRenderer {
    fn begin_page(&mut self, width: f32, height: f32) -> Result<(), RenderError> {
        self.close_page()?;
        self.page = Some(PageContext::new(width, height));
        Ok(())
    }

    fn draw_text(&mut self, command: &PlacementCommand) -> Result<(), RenderError> {
        let font_name = self
            .font_names
            .get(&command.variant)
            .ok_or(RenderError::UnknownFont(command.variant))?;
        let page = self.page.as_mut().ok_or(RenderError::NoPage)?;
        page.draw_text(command, font_name);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError> {
        let mut renderer = *self;
        renderer.close_page()?;
        debug!("Writing PDF with {} page(s)", renderer.page_ids.len());
        renderer.writer.finish(renderer.font_dict, &renderer.page_ids)
    }
}

#[derive(Default, Clone, PartialEq)]
struct TextState {
    font: Option<(String, f32)>,
    fill_color: Option<Color>,
}

struct PageContext {
    width: f32,
    height: f32,
    content: Content,
    state: TextState,
}

impl PageContext {
    fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            content: Content { operations: vec![] },
            state: TextState::default(),
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn set_font(&mut self, font_name: &str, size: f32) {
        let wanted = (font_name.to_string(), size);
        if self.state.font.as_ref() != Some(&wanted) {
            self.content.operations.push(Operation::new(
                "Tf",
                vec![Object::Name(font_name.as_bytes().to_vec()), size.into()],
            ));
            self.state.font = Some(wanted);
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.content
                .operations
                .push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
            self.state.fill_color = Some(color);
        }
    }

    fn draw_text(&mut self, command: &PlacementCommand, font_name: &str) {
        if command.text.is_empty() {
            return;
        }
        self.content.operations.push(Operation::new("BT", vec![]));
        self.set_font(font_name, command.size);
        self.set_fill_color(command.color);
        self.content
            .operations
            .push(Operation::new("Td", vec![command.x.into(), command.y.into()]));
        self.content
            .operations
            .push(Operation::new("Tj", vec![helpers::text_string(&command.text)]));
        self.content.operations.push(Operation::new("ET", vec![]));
    }
}
