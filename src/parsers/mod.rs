pub mod html;

#[cfg(test)]
mod tests;

pub use html::{PageParts, extract};
