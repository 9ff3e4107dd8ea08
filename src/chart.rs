//! Renders the expense breakdown as an ECharts pie chart in a standalone HTML
//! page.

use charming::{
    Chart,
    component::{Legend, Title},
    element::{Orient, Tooltip, Trigger},
    series::Pie,
};
use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::budget::ExpenseBreakdown;

/// The HTML element ID of the chart container.
const CHART_ID: &str = "expense-chart";

/// The ECharts build loaded by the chart page.
const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@5.5.1/dist/echarts.min.js";

/// Build a pie chart with one slice per category.
///
/// Hovering a slice shows the category, the amount and its share of the total.
pub fn expense_pie_chart(breakdown: &ExpenseBreakdown) -> Chart {
    let data: Vec<(f64, &str)> = breakdown
        .iter()
        .map(|(category, amount)| (amount.to_f64(), category.as_str()))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Expense Distribution by Category")
                .left("center"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .formatter("{b}: {c} ({d}%)"),
        )
        .legend(Legend::new().orient(Orient::Vertical).left("left"))
        .series(
            Pie::new()
                .name("Expenses")
                .radius("60%")
                .data(data),
        )
}

/// Render a full HTML page that draws `chart`.
///
/// Category names end up in the chart options verbatim, so `</` is escaped
/// to stop a name such as `</script>` from closing the script element.
pub fn chart_page(chart: &Chart) -> Markup {
    let options = chart.to_string().replace("</", "<\\/");
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chart = echarts.init(document.getElementById("{CHART_ID}"));
            chart.setOption({options});
            window.addEventListener('resize', chart.resize);
        }});"#
    );

    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Expenses - Budget Manager" }
                script src=(ECHARTS_URL) {}
                script { (PreEscaped(script)) }
            }
            body
            {
                div id=(CHART_ID) style="width: 100%; height: 600px;" {}
            }
        }
    }
}
