//! HTML rendering for the game pages.
//!
//! Pages are small and built with `write!` into a `String`. Every value that
//! comes from the catalog or the request is escaped before it is written.

use std::fmt::Write;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::constants::APP_NAME;
use crate::resolver::ResolvedConfig;

/// Escapes text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Serializes a value as JSON that is safe to place inside a `<script>` element.
///
/// `<`, `>` and `&` only occur inside JSON strings, where their `\uXXXX`
/// escapes decode to the same characters.
pub fn json_for_script<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// Wraps page content in the shared document shell.
fn document(title: &str, body: &str) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "<!DOCTYPE html>");
    let _ = writeln!(output, "<html lang=\"en\">");
    let _ = writeln!(output, "<head>");
    let _ = writeln!(output, "<meta charset=\"utf-8\">");
    let _ = writeln!(
        output,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
    );
    let _ = writeln!(
        output,
        "<title>{} - {}</title>",
        escape_html(title),
        escape_html(APP_NAME)
    );
    let _ = writeln!(output, "<link rel=\"stylesheet\" href=\"/static/style.css\">");
    let _ = writeln!(output, "</head>");
    let _ = writeln!(output, "<body>");
    let _ = writeln!(output, "<header><h1>{}</h1></header>", escape_html(APP_NAME));
    let _ = writeln!(output, "<main>");
    output.push_str(body);
    let _ = writeln!(output, "</main>");
    let _ = writeln!(output, "</body>");
    let _ = writeln!(output, "</html>");

    output
}

/// Landing page.
pub fn home() -> String {
    let mut body = String::new();

    let _ = writeln!(body, "<p>Catch the falling letters, animals and shapes!</p>");
    let _ = writeln!(
        body,
        "<a class=\"button\" href=\"/calibrate/\">Set up hand tracking</a>"
    );
    let _ = writeln!(body, "<a class=\"button\" href=\"/select/\">Play</a>");

    document("Welcome", &body)
}

/// Mode and level selection page, optionally showing an error message.
pub fn select(catalog: &Catalog, error: Option<&str>) -> String {
    let mut body = String::new();

    if let Some(error) = error {
        let _ = writeln!(body, "<div class=\"error\" role=\"alert\">{}</div>", escape_html(error));
    }

    let _ = writeln!(body, "<h2>Choose a game</h2>");
    let _ = writeln!(body, "<div class=\"cards\">");
    for (mode_key, mode) in catalog.modes() {
        let _ = writeln!(body, "<section class=\"card\" id=\"mode-{}\">", escape_html(mode_key));
        let _ = writeln!(body, "<div class=\"icon\">{}</div>", escape_html(&mode.icon));
        let _ = writeln!(body, "<h3>{}</h3>", escape_html(&mode.name));
        let _ = writeln!(body, "<p>{}</p>", escape_html(&mode.description));
        let _ = writeln!(body, "<ul>");
        for (level_key, level) in catalog.levels() {
            let _ = writeln!(
                body,
                "<li><a href=\"/play/{}/{}/\">{} {}</a></li>",
                escape_html(mode_key),
                escape_html(level_key),
                escape_html(&level.icon),
                escape_html(&level.name)
            );
        }
        let _ = writeln!(body, "</ul>");
        let _ = writeln!(body, "</section>");
    }
    let _ = writeln!(body, "</div>");

    let _ = writeln!(body, "<h2>Levels</h2>");
    let _ = writeln!(body, "<div class=\"cards\">");
    for (level_key, level) in catalog.levels() {
        let _ = writeln!(body, "<section class=\"card\" id=\"level-{}\">", escape_html(level_key));
        let _ = writeln!(body, "<div class=\"icon\">{}</div>", escape_html(&level.icon));
        let _ = writeln!(body, "<h3>{}</h3>", escape_html(&level.name));
        let _ = writeln!(body, "<p>{}</p>", escape_html(&level.description));
        let _ = writeln!(
            body,
            "<p>{} hearts, {} seconds</p>",
            level.starting_hearts, level.time_limit
        );
        let _ = writeln!(body, "</section>");
    }
    let _ = writeln!(body, "</div>");

    document("Choose a game", &body)
}

/// Hand tracking calibration page.
pub fn calibrate() -> String {
    let mut body = String::new();

    let _ = writeln!(body, "<h2>Hand tracking</h2>");
    let _ = writeln!(
        body,
        "<p>Hold your hand up in front of the camera until the circle turns green.</p>"
    );
    let _ = writeln!(body, "<div id=\"calibration\"></div>");
    let _ = writeln!(body, "<a class=\"button\" href=\"/select/\">I'm ready!</a>");

    document("Calibration", &body)
}

/// Game page with the resolved configuration embedded for the client.
pub fn play(
    mode_key: &str,
    level_key: &str,
    config: &ResolvedConfig,
) -> Result<String, serde_json::Error> {
    let config_json = json_for_script(config)?;
    let mut body = String::new();

    let _ = writeln!(
        body,
        "<h2>{} {} &middot; {} {}</h2>",
        escape_html(&config.mode.icon),
        escape_html(&config.mode.name),
        escape_html(&config.level.icon),
        escape_html(&config.level.name)
    );
    let _ = writeln!(
        body,
        "<p class=\"focus\">{}</p>",
        escape_html(&config.mode.challenge_focus)
    );
    let _ = writeln!(
        body,
        "<div class=\"hud\"><span id=\"hearts\"></span><span id=\"score\">0</span><span id=\"timer\"></span></div>"
    );
    let _ = writeln!(body, "<div id=\"prompt\"></div>");
    let _ = writeln!(
        body,
        "<div id=\"playfield\" data-mode=\"{}\" data-level=\"{}\"></div>",
        escape_html(mode_key),
        escape_html(level_key)
    );
    let _ = writeln!(
        body,
        "<script type=\"application/json\" id=\"game-config\">{config_json}</script>"
    );
    let _ = writeln!(body, "<script src=\"/static/play.js\"></script>");
    let _ = writeln!(body, "<a class=\"button\" href=\"/select/\">Change game</a>");

    let title = format!("{} - {}", config.mode.name, config.level.name);
    Ok(document(&title, &body))
}
