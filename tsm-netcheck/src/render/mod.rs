mod table;
pub use table::TableRenderer;

#[cfg(test)]
pub(crate) use table::visible_text;
