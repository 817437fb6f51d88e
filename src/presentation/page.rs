// Dashboard page rendering
use crate::application::dashboard_service::ChartPayload;
use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Render the dashboard page with every chart payload embedded.
pub fn render_dashboard(payloads: &[ChartPayload]) -> String {
    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Sensor Dashboard" }
                script src="https://cdn.plot.ly/plotly-2.27.0.min.js" {}
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                h1 { "Sensor Dashboard" }
                main .grid {
                    @for payload in payloads {
                        (chart_card(payload))
                    }
                }
                script { (PreEscaped(PAGE_JS)) }
            }
        }
    };
    page.into_string()
}

fn chart_card(payload: &ChartPayload) -> Markup {
    let sensor = &payload.sensor;
    html! {
        section .card {
            div .card-header {
                h2 { (sensor.title) }
                div .actions {
                    button .refresh type="button" data-id=(sensor.id) { "Refresh" }
                    form method="post" action="/" {
                        button type="submit" name=(sensor.download_field()) value="1" { "Download CSV" }
                    }
                }
            }
            div .chart id={ "chart-" (sensor.id) } {}
            // Script contents are not entity-decoded by browsers, so the JSON
            // goes in raw with only `</` neutralised.
            script type="application/json" id={ "payload-" (sensor.id) } {
                (PreEscaped(escape_script(&payload.json)))
            }
        }
    }
}

/// `<\/` is an equivalent JSON escape that cannot close the script element
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

const PAGE_CSS: &str = r##"
* { box-sizing: border-box; }
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    margin: 0;
    padding: 20px;
    background: #f5f5f5;
}
h1 { text-align: center; color: #333; margin-bottom: 20px; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(560px, 1fr)); gap: 20px; }
.card {
    background: white;
    padding: 15px;
    border-radius: 8px;
    box-shadow: 0 2px 4px rgba(0,0,0,0.1);
}
.card-header { display: flex; justify-content: space-between; align-items: center; }
.card-header h2 { font-size: 16px; color: #333; margin: 0; }
.actions { display: flex; gap: 8px; }
.actions form { margin: 0; }
.chart { height: 420px; }
"##;

const PAGE_JS: &str = r##"
function draw(id, figure) {
    Plotly.react('chart-' + id, figure.data, figure.layout, { responsive: true });
}

document.querySelectorAll('script[id^="payload-"]').forEach(function (el) {
    draw(el.id.substring('payload-'.length), JSON.parse(el.textContent));
});

document.querySelectorAll('button.refresh').forEach(function (button) {
    button.addEventListener('click', async function () {
        const id = button.dataset.id;
        button.disabled = true;
        try {
            const response = await fetch('/refresh', {
                method: 'POST',
                headers: { 'Content-Type': 'application/x-www-form-urlencoded' },
                body: new URLSearchParams({ id: id }),
            });
            if (!response.ok) {
                throw new Error(await response.text());
            }
            draw(id, await response.json());
        } catch (err) {
            console.error('Refresh failed for chart ' + id, err);
        } finally {
            button.disabled = false;
        }
    });
});
"##;
