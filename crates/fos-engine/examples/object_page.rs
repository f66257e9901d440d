//! Example: three `<object>` elements on one page

use fos_engine::{Config, EngineError, Page};
use fos_engine::html::LayoutNodeKind;
use fos_engine::net::MemoryResponse;

// 1x1 opaque black PNG
const PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f, 0x15, 0xc4,
    0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x60, 0x60, 0x60, 0xf8,
    0x0f, 0x00, 0x01, 0x04, 0x01, 0x00, 0x5f, 0xe5, 0xc3, 0x4b, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45,
    0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

fn main() -> Result<(), EngineError> {
    let config = Config::from_json(r#"{"log_filter": "fos_html=debug,info"}"#)?;
    fos_engine::init_logging(&config.log_filter);

    let mut page = Page::in_memory("https://example.com/", config)?;
    if let Err(e) = page.loader_mut().register(
        "https://example.com/pixel.png",
        MemoryResponse::ok().header("Content-Type", "image/png").body(PIXEL_PNG),
    ) {
        tracing::error!("Failed to register route: {}", e);
    }

    let image = page.create_object();
    page.set_attribute(image, "data", "pixel.png")?;
    let missing = page.create_object();
    page.set_attribute(missing, "data", "missing.swf")?;
    let empty = page.create_object();
    page.set_attribute(empty, "data", "")?;

    let ran = page.run_until_idle();
    println!("fOS Engine v{}: ran {} tasks", fos_engine::VERSION, ran);

    for node in [image, missing, empty] {
        let shown = match page.layout_node_kind(node) {
            Some(LayoutNodeKind::Image(decoded)) => format!("image {}x{}", decoded.width, decoded.height),
            Some(LayoutNodeKind::FallbackContent) => "fallback content".to_string(),
            Some(LayoutNodeKind::None) | None => "nothing".to_string(),
        };
        println!("{:?}: {} (events: {:?})", node, shown, page.events().names_for(node));
    }

    let update = page.update_layout();
    println!("relayout: {}, restyled: {:?}", update.relayout, update.restyled);
    Ok(())
}
