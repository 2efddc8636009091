/// Main configuration module.
/// 
/// Re-exports submodules for board geometry and server binding.
pub mod game;
pub mod server;
