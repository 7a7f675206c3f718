use crate::models::EmbeddedData;
use crate::stats::{ChartSource, build_charts};

/// Preview page: embeds the stats objects the way the site templates do and
/// mounts every chart that has data.
pub fn render_preview(data: &EmbeddedData, source: &str) -> Result<String, serde_json::Error> {
    let charts = build_charts(data);

    let mut mounts = String::new();
    for chart in &charts {
        let heading = ChartSource::ALL
            .into_iter()
            .find(|source| source.mount_id() == chart.mount_id)
            .and_then(|source| source.style().title)
            .unwrap_or_else(|| chart.mount_id.clone());
        mounts.push_str(&format!(
            "      <div class=\"chart-card\"><h2>{}</h2><canvas id=\"{}\"></canvas></div>\n",
            escape_html(&heading),
            escape_html(&chart.mount_id)
        ));
    }
    if charts.is_empty() {
        mounts.push_str("      <p class=\"hint\">No stats loaded.</p>\n");
    }

    let mut globals = String::new();
    if let Some(admin) = &data.admin_stats {
        globals.push_str(&format!("window._adminStats = {};\n", script_json(admin)?));
    }
    if let Some(trainer) = &data.trainer_stats {
        globals.push_str(&format!("window._trainerStats = {};\n", script_json(trainer)?));
    }
    if let Some(general) = &data.stats_data {
        globals.push_str(&format!("window._statsData = {};\n", script_json(general)?));
    }

    Ok(PREVIEW_HTML
        .replace("{{SOURCE}}", &escape_html(source))
        .replace("{{MOUNTS}}", &mounts)
        .replace("{{GLOBALS}}", &globals)
        .replace("{{CHARTS}}", &script_json(&charts)?))
}

/// JSON that is safe inside an inline `<script>`.
fn script_json(value: &impl serde::Serialize) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const PREVIEW_HTML: &str = r#"<!DOCTYPE html>
<html lang="sv">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Järnvilja – statistik</title>
  <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
  <style>
    :root {
      --bg: #121212;
      --card: #1e1e1e;
      --ink: #e0e0e0;
      --muted: #999;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    main {
      width: min(960px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    .charts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 16px;
    }

    .chart-card {
      background: var(--card);
      border-radius: 12px;
      padding: 16px;
      min-height: 280px;
    }

    .chart-card h2 {
      margin: 0 0 12px;
      font-size: 1rem;
    }

    .hint {
      color: var(--muted);
      font-size: 0.9rem;
    }
  </style>
</head>
<body>
  <main>
    <header>
      <h1>Statistik</h1>
      <p class="hint">Data: {{SOURCE}}</p>
    </header>
    <section class="charts">
{{MOUNTS}}    </section>
  </main>

  <script>
{{GLOBALS}}
    const charts = {{CHARTS}};
    if (typeof Chart !== 'undefined') {
      charts.forEach((mount) => {
        const el = document.getElementById(mount.mountId);
        if (el) new Chart(el, mount.config);
      });
    }
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdminStats;

    #[test]
    fn preview_embeds_globals_and_mounts() {
        let data = EmbeddedData {
            admin_stats: Some(AdminStats {
                bookings_by_day: Some([("Måndag", 2)].into_iter().collect()),
                ..AdminStats::default()
            }),
            ..EmbeddedData::default()
        };
        let html = render_preview(&data, "data/stats.json").unwrap();
        assert!(html.contains("window._adminStats = {\"bookingsByDay\":{\"Måndag\":2}"));
        assert!(html.contains("<canvas id=\"adminDayChart\">"));
        assert!(html.contains("<h2>Bokningar per veckodag</h2>"));
        assert!(!html.contains("window._trainerStats"));
    }

    #[test]
    fn empty_stats_render_a_hint() {
        let html = render_preview(&EmbeddedData::default(), "<none>").unwrap();
        assert!(html.contains("No stats loaded."));
        assert!(html.contains("Data: &lt;none&gt;"));
        assert!(html.contains("const charts = [];"));
    }

    #[test]
    fn script_json_cannot_close_the_script_tag() {
        let json = script_json(&"</script>").unwrap();
        assert_eq!(json, "\"<\\/script>\"");
    }
}
