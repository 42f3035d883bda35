mod chart_template_assets;

pub use chart_template_assets::EmbeddedTemplateCatalog;
