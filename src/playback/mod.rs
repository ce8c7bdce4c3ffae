pub mod autoplay;
