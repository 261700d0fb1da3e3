use anyhow::Result;

use crate::analysis::AnalysisReport;

pub fn metrics_to_csv(report: &AnalysisReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "sku",
        "upc",
        "match_count",
        "representative_asin",
        "sale_price",
        "total_cost",
        "profit",
        "roi",
        "margin_buy_box",
        "margin_msrp",
        "msrp_diff",
        "investment",
        "best_variant",
    ])?;
    for row in &report.rows {
        let metrics = &row.metrics;
        writer.write_record([
            row.product.sku.clone(),
            row.product.upc.clone().unwrap_or_default(),
            row.match_count.to_string(),
            row.representative
                .as_ref()
                .map(|l| l.sku.clone())
                .unwrap_or_default(),
            format!("{:.2}", metrics.sale_price),
            format!("{:.2}", metrics.total_cost),
            format!("{:.2}", metrics.profit),
            format!("{:.2}", metrics.roi),
            metrics
                .margin_buy_box
                .map(|m| format!("{m:.2}"))
                .unwrap_or_default(),
            format!("{:.2}", metrics.margin_msrp),
            format!("{:.2}", metrics.msrp_diff),
            format!("{:.2}", metrics.investment),
            row.best_variant.to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn variants_to_csv(report: &AnalysisReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["group", "best_sku", "match_count", "roi", "profit"])?;
    for row in report.rows.iter().filter(|row| row.best_variant) {
        writer.write_record([
            row.product.variant_group().to_string(),
            row.product.sku.clone(),
            row.match_count.to_string(),
            format!("{:.2}", row.metrics.roi),
            format!("{:.2}", row.metrics.profit),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
