pub mod jersey;
pub mod order;
pub mod overlay;

pub use jersey::{FacePlacement, JerseyColor, JerseyConfig, JerseySide, Size};
pub use order::{CustomerContact, OrderRecord, OrderStatus, PriceBreakdown};
pub use overlay::{
    Font, FontFamily, InkColor, OverlayElement, OverlayKind, OverlayRecord, Position,
};
