pub mod animation;
pub mod api;
pub mod clock;
pub mod coords;
pub mod error;
pub mod export;
pub mod led;
pub mod midi;
pub mod pitch;
pub mod settings;
pub mod timeline;

pub use animation::{generate_animation, Animation, Frame};
pub use api::{animate, animate_midi, render_csv};
pub use error::*;
pub use export::to_csv;
pub use settings::{LeadIn, Settings};
pub use timeline::{merge_streams, Event, EventKind, EventStream, RawEvent};
