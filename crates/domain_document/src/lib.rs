//! Reservation Document Domain
//!
//! This crate turns a complete reservation into a printable confirmation:
//!
//! ```text
//! ReservationAggregate -> DocumentComposer -> ReservationDocument -> DocumentRenderer -> RenderedArtifact
//! ```
//!
//! Composition is pure given its injected [`Clock`] and [`RandomSource`];
//! rendering is asynchronous and owns pagination and the per-page footer.
//!
//! [`Clock`]: core_kernel::Clock
//! [`RandomSource`]: core_kernel::RandomSource

pub mod composer;
pub mod document;
pub mod error;
pub mod layout;
pub mod locale;
pub mod renderer;

pub use composer::DocumentComposer;
pub use document::{
    Callout, DocumentSection, Field, FooterTemplate, ReservationDocument, SectionBody, SectionKind,
    Table,
};
pub use error::DocumentError;
pub use locale::{Localizer, DEFAULT_LOCALE};
pub use renderer::{DocumentRenderer, RenderedArtifact, TextRenderer, DEFAULT_PAGE_LINES};
