//! Default client assets compiled into the binary.

/// Bundled assets keyed by their path relative to the plugin root.
const ASSETS: &[(&str, &str)] = &[
    (
        "assets/widget/tree-widget.css",
        include_str!("../../../assets/widget/tree-widget.css"),
    ),
    (
        "assets/widget/tree-widget.js",
        include_str!("../../../assets/widget/tree-widget.js"),
    ),
    ("assets/treeview.css", include_str!("../../../assets/treeview.css")),
    ("assets/treeview.js", include_str!("../../../assets/treeview.js")),
    (
        "assets/icons/chevrons-down.svg",
        include_str!("../../../assets/icons/chevrons-down.svg"),
    ),
    (
        "assets/icons/chevrons-up.svg",
        include_str!("../../../assets/icons/chevrons-up.svg"),
    ),
    (
        "assets/icons/crosshair.svg",
        include_str!("../../../assets/icons/crosshair.svg"),
    ),
    (
        "assets/icons/refresh-cw.svg",
        include_str!("../../../assets/icons/refresh-cw.svg"),
    ),
    ("assets/icons/x.svg", include_str!("../../../assets/icons/x.svg")),
];

pub fn asset(path: &str) -> Option<&'static str> {
    ASSETS
        .iter()
        .find(|(p, _)| *p == path)
        .map(|(_, content)| *content)
}
