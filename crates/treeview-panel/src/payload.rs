//! Markup and script handed to the host panel.
//!
//! Page titles are user data. They only ever reach the script through
//! serde_json plus [`script_safe_json`], and the markup through
//! [`escape_html`].

use std::fmt::Write as _;

use anyhow::{Context, Result};
use serde::Serialize;

use treeview_core::{DragAndDropConfig, PageTree, TreeNode, TreeViewConfig};

use crate::assets::{PanelAssets, ToolbarAction};
use crate::commands::TreeViewCommand;
use crate::debounce::RESIZE_DEBOUNCE;

/// Id of the element the client runtime mounts the tree into.
pub const TREE_ELEMENT_ID: &str = "treeview-tree";

/// Host theme stylesheet linked ahead of the inline styles.
pub const HOST_STYLESHEET: &str = "/.client/main.css";

/// Client-side entry point defined by the plugin runtime.
pub const CLIENT_ENTRY_POINT: &str = "initializeTreeViewPanel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub html: String,
    pub script: String,
}

/// Object passed to the client entry point.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientConfig<'a> {
    nodes: &'a [TreeNode],
    current_page: Option<&'a str>,
    tree_element_id: &'a str,
    drag_and_drop: &'a DragAndDropConfig,
}

/// Build the panel payload. Pure: no I/O.
///
/// Styles are concatenated widget → plugin → user overrides so later rules win.
pub fn assemble_payload(
    tree: &PageTree,
    config: &TreeViewConfig,
    assets: &PanelAssets,
    custom_styles: Option<&str>,
) -> Result<Payload> {
    Ok(Payload {
        html: render_html(assets, custom_styles),
        script: render_script(tree, config, assets)?,
    })
}

fn render_html(assets: &PanelAssets, custom_styles: Option<&str>) -> String {
    let mut html = String::new();
    let _ = writeln!(html, r#"<link rel="stylesheet" href="{HOST_STYLESHEET}" />"#);

    html.push_str("<style>\n");
    for css in [
        Some(assets.widget_styles.as_str()),
        Some(assets.plugin_styles.as_str()),
        custom_styles,
    ]
    .into_iter()
    .flatten()
    {
        html.push_str(&neutralize_closing_tag(css, "style"));
        html.push('\n');
    }
    html.push_str("</style>\n");

    html.push_str("<div class=\"treeview-root\">\n");
    html.push_str("  <div class=\"treeview-header\">\n    <div class=\"treeview-actions\">\n");
    for action in ToolbarAction::ALL {
        let icon = assets.icon(action).unwrap_or_default();
        let _ = writeln!(
            html,
            r#"      <button type="button" class="treeview-action" data-treeview-action="{id}" title="{title}">{icon}</button>"#,
            id = action.id(),
            title = escape_html(action.title()),
        );
    }
    html.push_str("    </div>\n  </div>\n");
    let _ = writeln!(html, r#"  <div id="{TREE_ELEMENT_ID}"></div>"#);
    html.push_str("</div>\n");
    html
}

fn render_script(tree: &PageTree, config: &TreeViewConfig, assets: &PanelAssets) -> Result<String> {
    let client_config = ClientConfig {
        nodes: &tree.nodes,
        current_page: tree.current_page.as_deref(),
        tree_element_id: TREE_ELEMENT_ID,
        drag_and_drop: &config.drag_and_drop,
    };
    let json = serde_json::to_string(&client_config).context("Failed to serialize page tree")?;

    let mut script = String::new();
    script.push_str(&neutralize_closing_tag(&assets.widget_script, "script"));
    script.push('\n');
    script.push_str(&neutralize_closing_tag(&assets.plugin_script, "script"));
    script.push('\n');
    let _ = writeln!(script, "{CLIENT_ENTRY_POINT}({});", script_safe_json(&json));

    if config.auto_mobile_mode {
        let _ = write!(
            script,
            r#"(() => {{
  let pending;
  window.addEventListener("resize", () => {{
    clearTimeout(pending);
    pending = setTimeout(() => {{
      syscall("system.invokeFunction", {function});
    }}, {delay});
  }});
}})();
"#,
            function = script_safe_json(&serde_json::to_string(
                TreeViewCommand::ShowIfEnabled.function_name()
            )?),
            delay = RESIZE_DEBOUNCE.as_millis(),
        );
    }

    Ok(script)
}

// ── Escaping ─────────────────────────────────────────────────────────

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Make serialized JSON safe to inline in a `<script>` element.
///
/// Characters that could close the element or start an HTML comment are
/// turned into `\uXXXX` escapes, which decode to the same string value.
pub fn script_safe_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

/// Break any `</tag` sequence (case-insensitive) so inlined asset bodies
/// cannot terminate their enclosing element.
fn neutralize_closing_tag(body: &str, tag: &str) -> String {
    let needle = format!("</{tag}");
    let lower = body.to_ascii_lowercase();
    let mut out = String::with_capacity(body.len());
    let mut last = 0;
    for (idx, _) in lower.match_indices(&needle) {
        out.push_str(&body[last..idx]);
        out.push_str("<\\/");
        last = idx + 2;
    }
    out.push_str(&body[last..]);
    out
}

// ── Tests ────────────────────────────────────────────────────────────
