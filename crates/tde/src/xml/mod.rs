// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! XML data files.
//!
//! The root tag is the type tag of the root element. Structures write one
//! node per set field; collections write one node per slot, tagged with the
//! concrete type of the slot value or `<null/>`; maps wrap key and value in
//! `<entry>`; leaves hold their rendered text.
//!
//! ```text
//! <com.acme.Order>
//!   <paid>true</paid>
//!   <label>first</label>
//!   <lines class="list">
//!     <com.acme.Line>
//!       <qty>2</qty>
//!     </com.acme.Line>
//!     <null/>
//!   </lines>
//!   <code>AAEC</code>
//! </com.acme.Order>
//! ```

mod alias;
mod convert;
mod error;
mod marshal;
mod naming;
mod writer;

pub use alias::{AliasTable, MAP_ENTRY_TYPE};
pub use convert::{
    converter_for, BagConverter, IndexedConverter, KeyedConverter, NodeConverter,
    StructureConverter, ValueConverter,
};
pub use error::ConversionError;
pub use marshal::Marshaller;
pub use naming::{
    escape_name, parse_tag, type_tag, unescape_name, TagType, ARRAY_SUFFIX, CLASS_ATTRIBUTE,
    DEFINED_IN_ATTRIBUTE, NULL_TAG,
};
pub use writer::{WriterOptions, XmlWriter};

#[cfg(test)]
mod tests;
