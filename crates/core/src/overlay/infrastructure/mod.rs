pub mod json_lines_renderer;
