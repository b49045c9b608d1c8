mod flash;

pub use flash::{FlashTween, Interpolatable};
