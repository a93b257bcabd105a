#![no_main]

use libfuzzer_sys::fuzz_target;
use render_plan::{Component, OverrideRegistry, Payload, TextRun, can_collapse, compile};
use style::StyleConfiguration;

fuzz_target!(|data: &[u8]| {
    let Ok(markup) = std::str::from_utf8(data) else {
        return;
    };
    let style = StyleConfiguration::standard();

    let doc = html::parse_fragment(markup);
    let plain = OverrideRegistry::new();
    let _ = can_collapse(&doc.children, &plain);
    let _ = compile(&doc.children, &style, &plain);

    // Block link override flips the collapse decision for anchors.
    let overridden = OverrideRegistry::new()
        .with(Component::link(|scope, _, children, _| {
            Payload::new(scope.compile(children).len())
        }))
        .with(Component::tag_inline("span", |run: TextRun, _| run))
        .with(Component::unknown_element(|scope, el| {
            Payload::new(scope.compose(&el.children).text())
        }));
    let _ = compile(&doc.children, &style, &overridden);

    let doc = html::parse_document(markup);
    let _ = compile(&doc.children, &style, &plain);
});
