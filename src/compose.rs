use crate::{
    error::FavgenResult,
    fragment::Fragment,
    model::{CompositionSpec, StripMode, SvgDocument},
};

const FONT_FAMILY: &str = "system-ui, -apple-system, 'Segoe UI', sans-serif";

/// Assemble a new SVG document from the spec and an optional embedded
/// fragment. Pure: equal inputs reproduce byte-identical markup, which keeps
/// builds reproducible.
///
/// Emission order is fixed: gradient background, grid, fragment, labels,
/// accents. An absent fragment simply leaves the artwork region empty.
pub fn compose(spec: &CompositionSpec, fragment: Option<&Fragment>) -> FavgenResult<SvgDocument> {
    spec.validate()?;

    let w = spec.canvas.width;
    let h = spec.canvas.height;
    let mut out = String::with_capacity(4096);

    out.push_str(&format!(
        "<svg width=\"{w}\" height=\"{h}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
    ));

    out.push_str("  <defs>\n");
    out.push_str("    <linearGradient id=\"bg\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"1\">\n");
    for stop in &spec.gradient {
        out.push_str(&format!(
            "      <stop offset=\"{}%\" stop-color=\"{}\"/>\n",
            stop.offset, stop.color
        ));
    }
    out.push_str("    </linearGradient>\n");
    out.push_str("  </defs>\n");

    out.push_str(&format!(
        "  <rect width=\"{w}\" height=\"{h}\" fill=\"url(#bg)\"/>\n"
    ));

    out.push_str(&format!(
        "  <g opacity=\"{}\" stroke=\"{}\" stroke-width=\"{}\">\n",
        num(spec.grid.opacity),
        spec.grid.color,
        num(spec.grid.stroke_width)
    ));
    let cell = spec.grid.cell;
    for i in 0..=(w / cell) {
        let x = i * cell;
        out.push_str(&format!(
            "    <line x1=\"{x}\" y1=\"0\" x2=\"{x}\" y2=\"{h}\"/>\n"
        ));
    }
    for i in 0..=(h / cell) {
        let y = i * cell;
        out.push_str(&format!(
            "    <line x1=\"0\" y1=\"{y}\" x2=\"{w}\" y2=\"{y}\"/>\n"
        ));
    }
    out.push_str("  </g>\n");

    if let Some(frag) = fragment {
        let (tx, ty) = spec.placement.translate;
        out.push_str(&format!(
            "  <g transform=\"translate({},{}) scale({})\">\n",
            num(tx),
            num(ty),
            num(spec.placement.scale)
        ));
        out.push_str("    ");
        out.push_str(&strip_transform(frag.markup(), &spec.placement.strip));
        out.push('\n');
        out.push_str("  </g>\n");
    }

    for label in &spec.labels {
        out.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-family=\"{FONT_FAMILY}\" font-size=\"{}\"",
            num(label.x),
            num(label.y),
            num(label.font_size)
        ));
        if let Some(weight) = &label.font_weight {
            out.push_str(&format!(" font-weight=\"{weight}\""));
        }
        out.push_str(&format!(" fill=\"{}\"", label.fill));
        if let Some(spacing) = label.letter_spacing {
            out.push_str(&format!(" letter-spacing=\"{}\"", num(spacing)));
        }
        out.push_str(&format!(">{}</text>\n", escape_text(&label.text)));
    }

    for rect in &spec.accents {
        out.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" opacity=\"{}\" rx=\"{}\"/>\n",
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
            rect.fill,
            num(rect.opacity),
            num(rect.rx)
        ));
    }

    out.push_str("</svg>\n");
    Ok(SvgDocument::from_markup(out))
}

/// Cancel out a transform the fragment carries before the placement transform
/// is applied, per the spec's strategy. `Exact` only matches the known
/// placeholder value; `AnyRoot` clears whatever the root group declares.
fn strip_transform(markup: &str, mode: &StripMode) -> String {
    match mode {
        StripMode::Exact(value) => {
            let with_space = format!(" transform=\"{value}\"");
            if markup.contains(&with_space) {
                markup.replacen(&with_space, "", 1)
            } else {
                markup.replacen(&format!("transform=\"{value}\""), "", 1)
            }
        }
        StripMode::AnyRoot => {
            let Some(tag_end) = markup.find('>') else {
                return markup.to_string();
            };
            let root_tag = &markup[..tag_end];
            let Some(attr_start) = root_tag.find(" transform=\"") else {
                return markup.to_string();
            };
            let value_start = attr_start + " transform=\"".len();
            let Some(quote) = root_tag[value_start..].find('"') else {
                return markup.to_string();
            };
            let attr_end = value_start + quote + 1;
            format!("{}{}", &markup[..attr_start], &markup[attr_end..])
        }
    }
}

/// Print whole numbers without a trailing `.0` so emitted markup matches the
/// hand-written templates.
fn num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
