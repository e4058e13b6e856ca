//! Server-rendered HTML for the console pages.
//!
//! Every piece of operator or backend text goes through [`escape`].

use models::{Service, Settings};
use service::components::services_table::status_class;
use service::components::{ActiveView, AdminLogin, Dashboard, ServiceDraft, ServicesView, Tab};

pub const FOOTER: &str = "Pakistan-ready SMM panel. Payments: JazzCash • EasyPaisa";

const STYLE: &str = r#"
body { margin: 0; min-height: 100vh; padding: 24px; font-family: system-ui, sans-serif;
       background: linear-gradient(135deg, #eef2ff, #f0f9ff, #ecfdf5); color: #111827; }
.center { display: flex; justify-content: center; }
.card { background: #fff; border: 1px solid #e5e7eb; border-radius: 10px; padding: 16px; }
.login { max-width: 420px; width: 100%; }
.wide { max-width: 1100px; width: 100%; }
.grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 12px; }
.span-3 { grid-column: span 3; }
input, select { border: 1px solid #d1d5db; border-radius: 6px; padding: 8px 10px; width: 100%; box-sizing: border-box; }
button { border: 0; border-radius: 6px; padding: 8px 16px; cursor: pointer; }
.primary { background: #2563eb; color: #fff; }
.success { background: #16a34a; color: #fff; }
.link { background: none; color: #2563eb; padding: 4px 0; font-size: 12px; }
.tab { background: #fff; border: 1px solid #d1d5db; }
.tab.active { background: #2563eb; color: #fff; }
.header { display: flex; justify-content: space-between; align-items: center; }
.muted { color: #4b5563; font-size: 14px; }
.error { color: #dc2626; font-size: 14px; }
table { width: 100%; border-collapse: collapse; font-size: 14px; }
th, td { text-align: left; padding: 10px; border-top: 1px solid #e5e7eb; }
.badge { padding: 3px 8px; border-radius: 6px; color: #fff; }
.status-active { background: #059669; }
.status-inactive { background: #6b7280; }
footer { margin-top: 40px; text-align: center; font-size: 12px; color: #6b7280; }
"#;

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<div class="center">{body}</div>
<footer>{FOOTER}</footer>
</body>
</html>"#,
        title = escape(title),
    )
}

pub fn login_page(login: &AdminLogin) -> String {
    let error = login
        .error
        .as_deref()
        .map(|e| format!(r#"<div class="error">{}</div>"#, escape(e)))
        .unwrap_or_default();
    let toggle_label = if login.show { "Hide" } else { "Show" };
    let body = format!(
        r#"<div class="card login">
<h2>Admin Login</h2>
<p class="muted">Use any SHA256 hash as password_hash. On first login, an owner account is created for convenience.</p>
<form method="post" action="/login">
<p><input name="email" placeholder="Email" value="{email}"></p>
<p><input type="{input_type}" name="password_hash" placeholder="password_hash (SHA256)" value="{password_hash}">
<input type="hidden" name="show" value="{show}">
<button type="submit" name="action" value="toggle" class="link">{toggle_label}</button></p>
{error}
<p><button type="submit" name="action" value="login" class="primary" style="width:100%">Login</button></p>
</form>
</div>"#,
        email = escape(&login.email),
        input_type = login.password_input_type(),
        password_hash = escape(&login.password_hash),
        show = login.show,
    );
    layout("Admin Login", &body)
}

fn tabs(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|t| {
            let class = if *t == active { "tab active" } else { "tab" };
            format!(
                r#"<form method="post" action="/dashboard/tab" style="display:inline"><button type="submit" name="tab" value="{}" class="{}">{}</button></form> "#,
                t.as_str(),
                class,
                t.label()
            )
        })
        .collect()
}

fn status_option(value: &str, label: &str, draft: &ServiceDraft) -> String {
    let selected = if draft.status.as_str() == value { " selected" } else { "" };
    format!(r#"<option value="{value}"{selected}>{label}</option>"#)
}

fn service_form(draft: &ServiceDraft) -> String {
    format!(
        r#"<form method="post" action="/services" class="card grid">
<input name="name" placeholder="Name" value="{name}">
<input name="category" placeholder="Category" value="{category}">
<input name="rate_per_1k_pkr" placeholder="Rate per 1k (PKR)" value="{rate}">
<input name="min" type="number" placeholder="Min" value="{min}">
<input name="max" type="number" placeholder="Max" value="{max}">
<select name="status">{active}{paused}</select>
<input name="description" class="span-3" placeholder="Description" value="{description}">
<button type="submit" class="success">Add Service</button>
</form>"#,
        name = escape(&draft.name),
        category = escape(&draft.category),
        rate = escape(&draft.rate_per_1k_pkr),
        min = draft.min,
        max = draft.max,
        active = status_option("active", "Active", draft),
        paused = status_option("paused", "Paused", draft),
        description = escape(&draft.description),
    )
}

fn service_row(r: &Service) -> String {
    format!(
        r#"<tr><td><strong>{name}</strong></td><td>{category}</td><td>{rate}</td><td>{min}-{max}</td><td><span class="badge {class}">{status}</span></td></tr>"#,
        name = escape(&r.name),
        category = escape(&r.category),
        rate = r.rate_per_1k_pkr,
        min = r.min,
        max = r.max,
        class = status_class(&r.status),
        status = escape(r.status.as_str()),
    )
}

fn services_table(rows: &[Service]) -> String {
    let body: String = rows.iter().map(service_row).collect();
    format!(
        r#"<div class="card"><table>
<thead><tr><th>Name</th><th>Category</th><th>Rate/1k (PKR)</th><th>Min-Max</th><th>Status</th></tr></thead>
<tbody>{body}</tbody>
</table></div>"#
    )
}

fn services_view(view: &ServicesView) -> String {
    format!("{}<br>{}", service_form(view.form.draft()), services_table(view.table.rows()))
}

fn settings_view(settings: &Settings) -> String {
    format!(
        r#"<form method="post" action="/settings" class="card">
<div class="grid">
<input name="panel_name" placeholder="Panel Name" value="{panel_name}">
<input value="{currency}" readonly>
<input name="announcement" placeholder="Announcement" value="{announcement}">
</div>
<p><button type="submit" class="primary">Save Settings</button></p>
</form>"#,
        panel_name = escape(&settings.panel_name),
        currency = escape(&settings.currency),
        announcement = escape(settings.announcement_text()),
    )
}

pub fn dashboard_page(dashboard: &Dashboard) -> String {
    let title = dashboard.title();
    let content = match dashboard.view() {
        ActiveView::Services(v) => services_view(v),
        ActiveView::Settings(p) => settings_view(p.settings()),
    };
    let body = format!(
        r#"<div class="wide">
<div class="header"><h1>{heading}</h1><div class="muted">Secure session</div></div>
<div>{tabs}</div>
<br>
{content}
</div>"#,
        heading = escape(&title),
        tabs = tabs(dashboard.tab()),
    );
    layout(&title, &body)
}
