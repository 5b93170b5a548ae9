pub mod external_tools;
pub mod progress_bar_builder;
