use crate::compositor::sdf::{NOISE_KEY, NOISE_SCALE};
use crate::compositor::ChromeStyle;
use crate::coords::{ColorRgba, Vec2};

const COMPOSITOR_BODY: &str = include_str!("shaders/compositor.wgsl");

/// Full WGSL source for the compositor pipeline.
///
/// The style's tunables become `const` declarations and the toolbar buttons
/// are unrolled into `draw_buttons`, in paint order.
pub fn compositor_wgsl(style: &ChromeStyle) -> String {
    let bar = &style.bottom_bar;
    let panel = &style.side_panel;

    let mut src = String::with_capacity(COMPOSITOR_BODY.len() + 2048);
    src.push_str("// generated from ChromeStyle\n");

    let mut konst = |name: &str, ty: &str, value: String| {
        src.push_str(&format!("const {name}: {ty} = {value};\n"));
    };

    konst("NOISE_KEY", "vec2<f32>", vec2(NOISE_KEY));
    konst("NOISE_SCALE", "f32", float(NOISE_SCALE));
    konst("EDGE_WIDTH", "f32", float(bar.edge_width));
    konst("CORRECT_ASPECT", "bool", bar.correct_aspect.to_string());

    konst("BAR_THRESHOLD", "f32", float(bar.threshold));
    konst("BAR_GLASS", "vec4<f32>", vec4(bar.glass));
    konst("BAR_GLASS_MIX", "f32", float(bar.glass_mix));
    konst("BAR_GRAIN", "f32", float(bar.grain));

    konst("PANEL_THRESHOLD", "f32", float(panel.threshold));
    konst("PANEL_GLASS", "vec4<f32>", vec4(panel.glass));
    konst("PANEL_GLASS_MIX", "f32", float(panel.glass_mix));
    konst("THUMB_COUNT", "f32", float(panel.thumbnail_count));
    konst("THUMB_MARGIN", "vec2<f32>", vec2(panel.thumbnail_margin));
    konst("THUMB_GAP", "f32", float(panel.thumbnail_gap));
    konst("THUMB_COLOR", "vec4<f32>", vec4(panel.thumbnail_color));

    src.push_str("\nfn draw_buttons(color: vec4<f32>, uv: vec2<f32>, aspect: f32) -> vec4<f32> {\n");
    src.push_str("    var out = color;\n");
    for button in &bar.buttons {
        src.push_str(&format!("    // {}\n", button.kind.name()));
        src.push_str(&format!(
            "    out = mix(out, {}, vec4<f32>(circle_coverage(uv, {}, {}, aspect) * {}));\n",
            vec4(button.color),
            vec2(button.center),
            float(button.radius),
            float(button.weight),
        ));
    }
    src.push_str("    return out;\n}\n\n");

    src.push_str(COMPOSITOR_BODY);
    src
}

// `{:?}` always keeps a decimal point or exponent, so the literal stays f32.
fn float(v: f32) -> String {
    format!("{v:?}")
}

fn vec2(v: Vec2) -> String {
    format!("vec2<f32>({}, {})", float(v.x), float(v.y))
}

fn vec4(c: ColorRgba) -> String {
    format!(
        "vec4<f32>({}, {}, {}, {})",
        float(c.r),
        float(c.g),
        float(c.b),
        float(c.a)
    )
}
