use crate::error::RenderError;
use tagpress_layout::PlacementCommand;

/// A document sink for placement commands.
///
/// Commands are drawn in emission order, so later text paints over earlier
/// text where they overlap.
pub trait DocumentRenderer {
    /// Starts a new page; subsequent text goes onto it.
    fn begin_page(&mut self, width: f32, height: f32) -> Result<(), RenderError>;

    fn draw_text(&mut self, command: &PlacementCommand) -> Result<(), RenderError>;

    /// Serializes the finished document.
    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError>;
}
