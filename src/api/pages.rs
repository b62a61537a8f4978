// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::Write as _;
use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};

use super::server::AppState;
use crate::dashboard::EditorConfig;
use crate::model::Session;
use crate::render::html::escape_attr;

const LANDING_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>Vision Note</title>
</head>
<body>
<header>
<h1>Vision Note</h1>
<nav><a href="/sign-in">Login</a> <a href="/sign-up">Sign up</a></nav>
</header>
<main>
<p class="eyebrow">VISION NOTE</p>
<h1>Annotate and manage vision data efficiently</h1>
<p>Build your vision datasets by viewing images and adding detailed annotations. Simple, fast, and efficient annotation workflow.</p>
<p><a href="/sign-up">Get Started</a> <a href="/sign-in">Login</a></p>
</main>
</body>
</html>
"#;

pub(crate) async fn landing(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if state.sessions().resolve(&headers).is_some() {
        return Redirect::temporary("/dashboard").into_response();
    }
    Html(LANDING_HTML).into_response()
}

pub(crate) async fn dashboard(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let Some(session) = state.sessions().resolve(&headers) else {
        return Redirect::temporary("/").into_response();
    };
    tracing::debug!(user_id = %session.user_id(), "serving dashboard");
    Html(render_dashboard_shell(&session, state.editor_config())).into_response()
}

/// Static dashboard markup; the browser editor is constructed from the embedded config.
pub(crate) fn render_dashboard_shell(session: &Session, editor: &EditorConfig) -> String {
    let config = match serde_json::to_string(editor) {
        Ok(json) => json.replace("</", "<\\/"),
        Err(err) => {
            tracing::warn!(error = %err, "failed to serialize editor config");
            "{}".to_owned()
        }
    };

    let mut out = String::from(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n\
         <title>VisionNote</title>\n</head>\n",
    );
    let _ = writeln!(out, "<body data-user-id=\"{}\">", escape_attr(session.user_id().as_str()));
    out.push_str(concat!(
        "<header><h1>VisionNote</h1>",
        "<button id=\"toggle-split\" data-split=\"horizontal\">Split</button></header>\n",
        "<main>\n",
        "<section id=\"image-panel\"><h2>Image</h2>\n",
        "<div class=\"toolbar\"><button id=\"zoom-in\">Zoom in</button>",
        "<button id=\"zoom-out\">Zoom out</button><button id=\"crop\">Crop</button></div>\n",
        "<div id=\"image-stage\"><img id=\"source-image\" alt=\"Source\" /></div>\n",
        "<div class=\"navigation\"><button id=\"previous\" disabled>Previous</button>",
        "<button id=\"next\">Next</button></div>\n",
        "</section>\n",
        "<section id=\"editor-panel\"><h2>Editor</h2>\n",
        "<div class=\"toolbar\"><button id=\"save\">Save</button>",
        "<button id=\"export\">Export Markdown</button>",
        "<button id=\"publish\">Publish</button></div>\n",
    ));
    let _ = writeln!(out, "<div id=\"{}\"></div>", escape_attr(&editor.holder));
    out.push_str("</section>\n</main>\n");
    let _ = writeln!(
        out,
        "<script id=\"editor-config\" type=\"application/json\">{config}</script>"
    );
    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::session;

    #[test]
    fn shell_embeds_editor_config_and_user() {
        let html = render_dashboard_shell(&session("user_\"1\""), &EditorConfig::default());
        assert!(html.contains("data-user-id=\"user_&quot;1&quot;\""));
        assert!(html.contains("<div id=\"editorjs\"></div>"));
        assert!(html.contains("\"placeholder\":\"Type your description here...\""));
        assert!(html.contains("\"byFile\":\"/api/uploadImage\""));
        assert!(html.contains("\"byUrl\":\"/api/fetchUrl\""));
    }
}
