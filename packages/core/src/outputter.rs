//! The contract shared by every renderer.

use std::io;

use crate::schema::Schema;

/// A renderer bound to exactly one [`Schema`] node.
///
/// Outputters hold a shared borrow of their schema and no other state that
/// depends on its contents, so every call to [`Outputter::get`] walks the
/// tree as it is now. Rendering never mutates the schema.
pub trait Outputter<'a> {
    /// Bind a new outputter to `schema`.
    fn new(schema: &'a Schema) -> Self
    where
        Self: Sized;

    /// The node this outputter renders.
    fn schema(&self) -> &'a Schema;

    /// Render the bound node and everything nested under it.
    fn get(&self) -> String;

    /// Write the rendering to a caller-provided sink.
    fn output<W: io::Write>(&self, out: &mut W) -> io::Result<()>
    where
        Self: Sized,
    {
        out.write_all(self.get().as_bytes())
    }
}
