use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::analysis::AnalysisReport;
use crate::classify::{classify, ClassifyContext, MetricKind, MetricValue, Tier};

pub fn render_metrics_table(report: &AnalysisReport) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "SKU",
        "Matches",
        "Sale Price",
        "Total Cost",
        "Profit",
        "ROI %",
        "Margin BB %",
        "Margin MSRP %",
        "MSRP Diff %",
        "Rank",
        "Availability",
        "Best",
    ]);

    for row in &report.rows {
        let metrics = &row.metrics;
        let no_buy_box = metrics.margin_buy_box.is_none();
        let ctx = ClassifyContext { no_buy_box };

        let profit_cell = tinted(
            format!("{:.2}", metrics.profit),
            classify(
                MetricKind::Profit,
                Some(&MetricValue::Numeric(metrics.profit)),
                ctx,
            ),
        );
        let roi_cell = tinted(
            format!("{:.1}", metrics.roi),
            classify(MetricKind::Roi, Some(&MetricValue::Numeric(metrics.roi)), ctx),
        );
        let margin_bb_cell = tinted(
            metrics
                .margin_buy_box
                .map(|m| format!("{m:.1}"))
                .unwrap_or_else(|| "no buy box".to_string()),
            classify(
                MetricKind::MarginBuyBox,
                metrics.margin_buy_box.map(MetricValue::Numeric).as_ref(),
                ctx,
            ),
        );
        let msrp_diff_cell = tinted(
            format!("{:.1}", metrics.msrp_diff),
            classify(
                MetricKind::MsrpDiff,
                Some(&MetricValue::Numeric(metrics.msrp_diff)),
                ctx,
            ),
        );
        let rank = row.sales_rank();
        let rank_cell = tinted(
            rank.map(|r| format!("{r:.0}")).unwrap_or_else(|| "-".to_string()),
            classify(
                MetricKind::SalesRank,
                rank.map(MetricValue::Numeric).as_ref(),
                ctx,
            ),
        );
        let availability = row.availability();
        let availability_cell = tinted(
            availability.clone().unwrap_or_else(|| "-".to_string()),
            classify(
                MetricKind::Availability,
                availability.map(MetricValue::Text).as_ref(),
                ctx,
            ),
        );

        table.add_row(Row::from(vec![
            Cell::new(&row.product.sku),
            Cell::new(row.match_count.to_string()),
            Cell::new(format!("{:.2}", metrics.sale_price)),
            Cell::new(format!("{:.2}", metrics.total_cost)),
            profit_cell,
            roi_cell,
            margin_bb_cell,
            Cell::new(format!("{:.1}", metrics.margin_msrp)),
            msrp_diff_cell,
            rank_cell,
            availability_cell,
            Cell::new(if row.best_variant { "★" } else { "" }),
        ]));
    }

    let mut rendered = table.to_string();
    rendered.push_str(&format!(
        "\n{} products, {} matched (shipping {:.2}, misc {:.2})",
        report.product_count,
        report.matched_count,
        report.costs.shipping_cost,
        report.costs.misc_cost
    ));
    rendered
}

pub fn render_variants_table(report: &AnalysisReport) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Group", "Best SKU", "Matches", "ROI %", "Profit"]);
    for row in report.rows.iter().filter(|row| row.best_variant) {
        table.add_row(vec![
            row.product.variant_group().to_string(),
            row.product.sku.clone(),
            row.match_count.to_string(),
            format!("{:.1}", row.metrics.roi),
            format!("{:.2}", row.metrics.profit),
        ]);
    }
    table.to_string()
}

pub fn render_matches_table(report: &AnalysisReport) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["SKU", "UPC", "Match Count", "Matched ASINs"]);
    for row in &report.rows {
        table.add_row(vec![
            row.product.sku.clone(),
            row.product.upc.clone().unwrap_or_else(|| "-".to_string()),
            row.match_count.to_string(),
            row.matched_skus.join(", "),
        ]);
    }
    table.to_string()
}

fn tinted(content: String, tier: Tier) -> Cell {
    let cell = Cell::new(content);
    match tier {
        Tier::Favorable => cell.fg(Color::Green),
        Tier::Caution => cell.fg(Color::Yellow),
        Tier::Unfavorable => cell.fg(Color::Red),
        Tier::Neutral => cell,
    }
}
