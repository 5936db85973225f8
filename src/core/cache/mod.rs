pub mod render_cache;
