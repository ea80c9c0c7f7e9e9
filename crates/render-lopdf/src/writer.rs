use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use tagpress_render_core::RenderError;

/// Object bookkeeping for one PDF document.
///
/// The resources, page tree and catalog ids are reserved up front so pages
/// can reference them before they are written in [`PdfWriter::finish`].
pub struct PdfWriter {
    document: Document,
    pub resources_id: ObjectId,
    pub pages_id: ObjectId,
    pub catalog_id: ObjectId,
}

impl PdfWriter {
    pub fn new(version: &str) -> Self {
        let mut document = Document::with_version(version);
        let resources_id = document.new_object_id();
        let pages_id = document.new_object_id();
        let catalog_id = document.new_object_id();
        Self {
            document,
            resources_id,
            pages_id,
            catalog_id,
        }
    }

    pub fn add_object(&mut self, object: impl Into<Object>) -> ObjectId {
        self.document.add_object(object)
    }

    pub fn write_content_stream(&mut self, content: Content) -> Result<ObjectId, RenderError> {
        let stream = Stream::new(dictionary! {}, content.encode()?);
        Ok(self.add_object(Object::Stream(stream)))
    }

    pub fn write_page(
        &mut self,
        content_id: ObjectId,
        width: f32,
        height: f32,
    ) -> ObjectId {
        let page = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        self.add_object(page)
    }

    /// Writes the reserved objects and serializes the document.
    pub fn finish(
        mut self,
        font_dict: Dictionary,
        page_ids: &[ObjectId],
    ) -> Result<Vec<u8>, RenderError> {
        self.document.objects.insert(
            self.resources_id,
            dictionary! { "Font" => font_dict }.into(),
        );

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            "Count" => page_ids.len() as i64,
        };
        self.document.objects.insert(self.pages_id, pages.into());

        let catalog = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        self.document.objects.insert(self.catalog_id, catalog.into());
        self.document.trailer.set("Root", self.catalog_id);

        let info_id = self.add_object(dictionary! {
            "Producer" => Object::string_literal("tagpress"),
        });
        self.document.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}
