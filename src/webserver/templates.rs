/// HTML templates for the portal pages
///
/// All pages are rendered from inline templates: a shared base template with
/// header, navigation tabs, and footer, plus per-page content functions.
/// The dashboard and audit pages fetch their data from the JSON API with
/// small inline scripts; no chart library is used.

/// Base HTML template with navigation and common styles
pub fn base_template(title: &str, active_tab: &str, content: &str) -> String {
    let brand = crate::config::with_config(|cfg| cfg.portal.brand.clone());

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - {brand}</title>
    <style>
        {common_styles}
    </style>
</head>
<body>
    <div class="header">
        <h1>{brand}</h1>
        <div class="subtitle">Government Tax Portal</div>
    </div>

    <nav class="tabs">
        {nav_tabs}
    </nav>

    <main class="content">
        {content}
    </main>

    <footer class="footer">
        <p>{brand} v0.1.0 | demonstration portal | <a href="/api/health">Status</a></p>
    </footer>
</body>
</html>"#,
        title = title,
        brand = brand,
        common_styles = common_styles(),
        nav_tabs = nav_tabs(active_tab),
        content = content,
    )
}

/// Common CSS styles
fn common_styles() -> &'static str {
    r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #f5f7fa;
            color: #2d3748;
            line-height: 1.6;
        }

        .header {
            background: linear-gradient(135deg, #1a365d 0%, #2c5282 100%);
            color: white;
            padding: 20px 30px;
        }

        .header h1 { font-size: 1.8em; font-weight: 600; }
        .header .subtitle { font-size: 0.9em; opacity: 0.8; }

        .tabs {
            background: white;
            padding: 0 30px;
            display: flex;
            gap: 4px;
            border-bottom: 1px solid #e2e8f0;
        }

        .tab {
            padding: 14px 18px;
            text-decoration: none;
            color: #4a5568;
            border-bottom: 3px solid transparent;
            font-weight: 500;
        }

        .tab:hover { color: #2c5282; }
        .tab.active { color: #2c5282; border-bottom-color: #2c5282; }

        .content { padding: 30px; max-width: 1100px; margin: 0 auto; }

        .footer {
            text-align: center;
            padding: 20px;
            color: #718096;
            font-size: 0.85em;
        }

        .footer a { color: #2c5282; }

        .page-title { font-size: 1.5em; font-weight: 600; margin-bottom: 4px; }
        .page-description { color: #718096; margin-bottom: 24px; }

        .card {
            background: white;
            border-radius: 8px;
            padding: 20px;
            box-shadow: 0 1px 3px rgba(0,0,0,0.08);
            margin-bottom: 20px;
        }

        .card h3 { margin-bottom: 12px; font-size: 1.05em; }

        .metric-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
            gap: 16px;
            margin-bottom: 24px;
        }

        .metric-card .metric-title { font-size: 0.85em; color: #718096; }
        .metric-card .metric-value { font-size: 1.6em; font-weight: 700; }
        .metric-card .metric-delta { font-size: 0.8em; color: #718096; }

        .chart-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(380px, 1fr));
            gap: 16px;
        }

        .bar-row { display: flex; align-items: center; gap: 8px; margin: 6px 0; }
        .bar-label { width: 52px; font-size: 0.8em; color: #4a5568; }
        .bar-track { flex: 1; background: #edf2f7; border-radius: 4px; height: 18px; }
        .bar-fill { background: #2c5282; height: 100%; border-radius: 4px; }
        .bar-value { width: 80px; font-size: 0.8em; text-align: right; }

        .form-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 14px; }
        .form-field { display: flex; flex-direction: column; }
        .form-field.full { grid-column: 1 / -1; }
        .form-field label { font-size: 0.85em; color: #4a5568; margin-bottom: 4px; }

        .form-field input, .form-field select {
            padding: 9px 10px;
            border: 1px solid #cbd5e0;
            border-radius: 6px;
            font-size: 0.95em;
        }

        .button {
            background: #2c5282;
            color: white;
            border: none;
            padding: 11px 22px;
            border-radius: 6px;
            font-size: 0.95em;
            font-weight: 600;
            cursor: pointer;
            margin-top: 16px;
        }

        .button:hover { background: #1a365d; }
        .button:disabled { background: #a0aec0; cursor: wait; }

        .risk-badge {
            display: inline-block;
            padding: 4px 12px;
            border-radius: 14px;
            font-size: 0.85em;
            font-weight: 600;
        }

        .risk-badge.high { background: #fed7d7; color: #c53030; }
        .risk-badge.low { background: #c6f6d5; color: #276749; }

        .score-track { background: #edf2f7; border-radius: 6px; height: 12px; margin: 10px 0; }
        .score-fill { background: #c53030; height: 100%; border-radius: 6px; }

        .error-box {
            background: #fed7d7;
            color: #c53030;
            padding: 12px 16px;
            border-radius: 6px;
            margin-top: 16px;
        }

        .placeholder {
            text-align: center;
            padding: 60px 20px;
            color: #718096;
        }

        .placeholder .badge-soon {
            display: inline-block;
            background: #bee3f8;
            color: #2c5282;
            padding: 4px 12px;
            border-radius: 14px;
            font-size: 0.8em;
            font-weight: 600;
            margin-bottom: 12px;
        }
    "#
}

/// Navigation tabs with active highlighting
fn nav_tabs(active_tab: &str) -> String {
    let tabs = [
        ("dashboard", "/dashboard", "Dashboard"),
        ("audit", "/audit", "Audit Selection"),
        ("file-return", "/file-return", "File Return"),
        ("payments", "/payments", "Payments"),
        ("notices", "/notices", "Notices"),
    ];

    tabs.iter()
        .map(|(id, href, label)| {
            let class = if *id == active_tab { "tab active" } else { "tab" };
            format!(r#"<a class="{}" href="{}">{}</a>"#, class, href, label)
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

/// Standalone login page (no portal chrome before login)
pub fn login_page() -> String {
    let brand = crate::config::with_config(|cfg| cfg.portal.brand.clone());

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Login - {brand}</title>
    <style>
        {common_styles}

        .login-wrap {{
            display: flex;
            justify-content: center;
            align-items: center;
            min-height: 80vh;
        }}

        .login-card {{ width: 380px; }}
    </style>
</head>
<body>
    <div class="header">
        <h1>{brand}</h1>
        <div class="subtitle">Government Tax Portal</div>
    </div>

    <div class="login-wrap">
        <div class="card login-card">
            <h3>Taxpayer Login</h3>
            <p class="page-description">Enter your PAN to continue (demonstration only).</p>
            <div class="form-field full">
                <label for="pan">PAN</label>
                <input id="pan" maxlength="10" placeholder="ABCDE1234F">
            </div>
            <button class="button" id="loginBtn" onclick="doLogin()">Login</button>
            <div id="loginError"></div>
        </div>
    </div>

    <footer class="footer">
        <p>{brand} v0.1.0 | demonstration portal</p>
    </footer>

    <script>
        async function doLogin() {{
            const btn = document.getElementById('loginBtn');
            const errorBox = document.getElementById('loginError');
            errorBox.innerHTML = '';
            btn.disabled = true;

            try {{
                const response = await fetch('/api/session/login', {{
                    method: 'POST',
                    headers: {{ 'Content-Type': 'application/json' }},
                    body: JSON.stringify({{ pan: document.getElementById('pan').value }})
                }});
                const body = await response.json();
                if (response.ok) {{
                    window.location.href = body.redirect;
                }} else {{
                    errorBox.innerHTML = '<div class="error-box">' + body.error.message + '</div>';
                }}
            }} catch (e) {{
                errorBox.innerHTML = '<div class="error-box">Login failed: ' + e + '</div>';
            }} finally {{
                btn.disabled = false;
            }}
        }}
    </script>
</body>
</html>"#,
        brand = brand,
        common_styles = common_styles(),
    )
}

/// Dashboard page content: metric cards + two sample-data charts
pub fn dashboard_content() -> String {
    r#"<div class="page-title">Dashboard</div>
    <div class="page-description">Overview of tax collection and compliance metrics.</div>

    <div class="metric-grid" id="metricGrid"></div>

    <div class="chart-grid">
        <div class="card">
            <h3>Revenue by Quarter</h3>
            <div id="revenueChart"></div>
        </div>
        <div class="card">
            <h3>Compliance Over Time</h3>
            <div id="complianceChart"></div>
        </div>
    </div>

    <script>
        function barRow(label, fraction, valueText) {
            const pct = Math.round(fraction * 100);
            return '<div class="bar-row">' +
                '<div class="bar-label">' + label + '</div>' +
                '<div class="bar-track"><div class="bar-fill" style="width:' + pct + '%"></div></div>' +
                '<div class="bar-value">' + valueText + '</div>' +
                '</div>';
        }

        async function loadDashboard() {
            const [summary, revenue, compliance] = await Promise.all([
                fetch('/api/dashboard/summary').then(r => r.json()),
                fetch('/api/dashboard/revenue').then(r => r.json()),
                fetch('/api/dashboard/compliance').then(r => r.json()),
            ]);

            document.getElementById('metricGrid').innerHTML = summary.metrics.map(m =>
                '<div class="card metric-card">' +
                '<div class="metric-title">' + m.title + '</div>' +
                '<div class="metric-value">' + m.value + '</div>' +
                '<div class="metric-delta">' + m.delta + '</div>' +
                '</div>'
            ).join('');

            const maxRevenue = Math.max(...revenue.series.map(p => p.revenue));
            document.getElementById('revenueChart').innerHTML = revenue.series.map(p =>
                barRow(p.quarter, p.revenue / maxRevenue, '₹' + p.revenue.toLocaleString() + ' Cr')
            ).join('');

            document.getElementById('complianceChart').innerHTML = compliance.series.map(p =>
                barRow(p.month, p.rate / 100, p.rate.toFixed(1) + '%')
            ).join('');
        }

        loadDashboard().catch(e => console.error('Dashboard load failed:', e));
    </script>"#
        .to_string()
}

/// Audit selection page content: the analysis form and result panel
///
/// Form defaults and the injected comparison values mirror the demonstration
/// scenario; filingDate is set to the current timestamp at submit time.
pub fn audit_content() -> String {
    r#"<div class="page-title">AI-Driven Audit Selection</div>
    <div class="page-description">Analyze tax returns to identify high-risk cases using generative AI.</div>

    <div class="chart-grid">
        <div class="card">
            <h3>Tax Return Data</h3>
            <div class="form-grid">
                <div class="form-field full">
                    <label for="taxpayerId">Taxpayer ID (PAN)</label>
                    <input id="taxpayerId" value="AWBPC1234E" maxlength="10">
                </div>
                <div class="form-field full">
                    <label for="taxYear">Tax Year</label>
                    <input id="taxYear" value="2023-2024">
                </div>
                <div class="form-field">
                    <label for="incomeReported">Income Reported (₹)</label>
                    <input id="incomeReported" type="number" value="5000000">
                </div>
                <div class="form-field">
                    <label for="deductionsClaimed">Deductions Claimed (₹)</label>
                    <input id="deductionsClaimed" type="number" value="1500000">
                </div>
                <div class="form-field">
                    <label for="taxPaid">Tax Paid (₹)</label>
                    <input id="taxPaid" type="number" value="800000">
                </div>
                <div class="form-field">
                    <label for="previousAuditStatus">Previous Audit Status</label>
                    <select id="previousAuditStatus">
                        <option value="None" selected>None</option>
                        <option value="Audited_NoIssues">Audited - No Issues</option>
                        <option value="Audited_IssuesFound">Audited - Issues Found</option>
                    </select>
                </div>
            </div>
            <button class="button" id="analyzeBtn" onclick="runAnalysis()">Analyze Return</button>
            <div id="analysisError"></div>
        </div>

        <div class="card">
            <h3>Risk Assessment</h3>
            <div id="result" class="placeholder">Submit a return to see the AI assessment.</div>
        </div>
    </div>

    <script>
        async function runAnalysis() {
            const btn = document.getElementById('analyzeBtn');
            const errorBox = document.getElementById('analysisError');
            errorBox.innerHTML = '';
            btn.disabled = true;
            document.getElementById('result').innerHTML =
                '<div class="placeholder">Analyzing…</div>';

            const request = {
                taxpayerId: document.getElementById('taxpayerId').value,
                taxYear: document.getElementById('taxYear').value,
                incomeReported: Number(document.getElementById('incomeReported').value),
                deductionsClaimed: Number(document.getElementById('deductionsClaimed').value),
                taxPaid: Number(document.getElementById('taxPaid').value),
                previousAuditStatus: document.getElementById('previousAuditStatus').value,
                industryType: 'IT Services',
                averageDeductionsForIndustry: 800000,
                averageTaxPaidForIncomeBracket: 1000000,
                filingDate: new Date().toISOString(),
            };

            try {
                const response = await fetch('/api/audit/analyze', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify(request)
                });
                const body = await response.json();

                if (!response.ok) {
                    document.getElementById('result').innerHTML =
                        '<div class="placeholder">Submit a return to see the AI assessment.</div>';
                    errorBox.innerHTML = '<div class="error-box">' + body.error.message + '</div>';
                    return;
                }

                renderAssessment(body);
            } catch (e) {
                errorBox.innerHTML = '<div class="error-box">Analysis failed: ' + e + '</div>';
            } finally {
                btn.disabled = false;
            }
        }

        function renderAssessment(a) {
            const badge = a.isHighRisk
                ? '<span class="risk-badge high">High Risk</span>'
                : '<span class="risk-badge low">Low Risk</span>';

            const reasons = (a.riskReasons || []).map(r => '<li>' + r + '</li>').join('');

            document.getElementById('result').innerHTML =
                badge +
                '<div class="score-track"><div class="score-fill" style="width:' +
                    Math.round(a.riskScore) + '%"></div></div>' +
                '<p><strong>Risk Score:</strong> ' + a.riskScore + ' / 100</p>' +
                (reasons ? '<p><strong>Risk Factors:</strong></p><ul>' + reasons + '</ul>' : '') +
                '<p><strong>Summary:</strong> ' + a.summaryOfAnomalies + '</p>' +
                '<p><strong>Recommended Action:</strong> ' + a.recommendedAction + '</p>';
        }
    </script>"#
        .to_string()
}

/// "Under development" content for the placeholder pages
pub fn placeholder_content(title: &str, description: &str) -> String {
    format!(
        r#"<div class="page-title">{title}</div>
    <div class="card">
        <div class="placeholder">
            <div class="badge-soon">Under Development</div>
            <p>{description}</p>
        </div>
    </div>"#,
        title = title,
        description = description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_template_marks_active_tab() {
        let page = base_template("Dashboard", "dashboard", "<p>hi</p>");
        assert!(page.contains(r#"class="tab active" href="/dashboard""#));
        assert!(page.contains(r#"class="tab" href="/audit""#));
        assert!(page.contains("<p>hi</p>"));
    }

    #[test]
    fn test_audit_form_defaults() {
        let content = audit_content();
        assert!(content.contains("AWBPC1234E"));
        assert!(content.contains("2023-2024"));
        assert!(content.contains(r#"value="5000000""#));
        assert!(content.contains("Audited_IssuesFound"));
    }

    #[test]
    fn test_login_page_posts_to_session_api() {
        let page = login_page();
        assert!(page.contains("/api/session/login"));
    }
}
