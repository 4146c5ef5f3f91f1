use crate::*;
pub use random::*;

mod random;

/// Strategy for placing mines on a freshly created board.
pub trait MineLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// Fixed layouts generate themselves, which lets callers replay a known board.
impl MineLayoutGenerator for MineLayout {
    fn generate(self, config: GameConfig) -> MineLayout {
        if self.game_config().ok() != Some(config) {
            log::warn!(
                "Fixed layout does not match requested {:?}, using layout as is",
                config
            );
        }
        self
    }
}
