//! The stylesheet and inline style attributes

use indexmap::IndexMap;
use itertools::Itertools;

/// The base stylesheet. It does not depend on the compiled program.
pub const STYLESHEET: &str = "\
.frobo-component {
  padding: 20px;
  margin: 10px;
  border: 1px solid #ddd;
  border-radius: 8px;
}

.frobo-component p {
  margin: 10px 0;
  font-size: 16px;
}

.frobo-component h1 {
  margin: 10px 0;
  font-size: 24px;
  font-weight: bold;
}

.frobo-component button {
  padding: 10px 20px;
  margin: 5px;
  background-color: #007bff;
  color: white;
  border: none;
  border-radius: 4px;
  cursor: pointer;
}

.frobo-component button:hover {
  background-color: #0056b3;
}

.frobo-component input {
  padding: 8px 12px;
  margin: 5px;
  border: 1px solid #ccc;
  border-radius: 4px;
  font-size: 14px;
}";

/// Properties whose unitless numbers are pixel lengths
const PIXEL_PROPERTIES: [&str; 12] = [
    "width",
    "height",
    "margin",
    "padding",
    "top",
    "right",
    "bottom",
    "left",
    "font-size",
    "border-width",
    "border-radius",
    "gap",
];

/// Renders style properties as the contents of a `style` attribute, such as
/// `font-size: 16px; color: red`
pub fn inline_styles(styles: &IndexMap<String, String>) -> String {
    styles
        .iter()
        .map(|(property, value)| {
            let property = kebab_case(property);
            let value = with_unit(&property, value);
            format!("{property}: {value}")
        })
        .join("; ")
}

/// Converts `fontSize` to `font-size`. Names already in kebab case are only lowercased.
fn kebab_case(property: &str) -> String {
    let mut kebab = String::with_capacity(property.len() + 4);
    let mut previous_lower = false;
    for c in property.chars() {
        if c.is_ascii_uppercase() && previous_lower {
            kebab.push('-');
        }
        previous_lower = c.is_ascii_lowercase();
        kebab.push(c.to_ascii_lowercase());
    }
    kebab
}

fn with_unit(property: &str, value: &str) -> String {
    let is_integer = !value.is_empty() && value.chars().all(|c| c.is_ascii_digit());
    if is_integer && PIXEL_PROPERTIES.contains(&property) {
        format!("{value}px")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("fontSize"), "font-size");
        assert_eq!(kebab_case("borderTopWidth"), "border-top-width");
        assert_eq!(kebab_case("font-weight"), "font-weight");
        assert_eq!(kebab_case("color"), "color");
    }

    #[test]
    fn test_pixel_units() {
        assert_eq!(with_unit("padding", "24"), "24px");
        assert_eq!(with_unit("padding", "1.5em"), "1.5em");
        assert_eq!(with_unit("font-weight", "600"), "600");
        assert_eq!(with_unit("width", "100%"), "100%");
    }

    #[test]
    fn test_inline_styles() {
        let styles = IndexMap::from([
            ("fontSize".to_string(), "16".to_string()),
            ("background".to_string(), "#fff".to_string()),
            ("border-radius".to_string(), "8".to_string()),
        ]);
        assert_eq!(
            inline_styles(&styles),
            "font-size: 16px; background: #fff; border-radius: 8px"
        );
    }

    #[test]
    fn test_stylesheet_is_trimmed() {
        assert!(STYLESHEET.starts_with(".frobo-component {"));
        assert!(STYLESHEET.ends_with('}'));
    }
}
