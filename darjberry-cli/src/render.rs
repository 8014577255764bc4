//! Plain-text output for each command.

use std::fmt::{self, Write};

use darjberry_core::calculations::{LoanEligibility, TeaEstateComparison};
use darjberry_core::location::SatelliteSuitability;
use darjberry_core::{InvestmentRecord, LocationCheck};

use crate::app::{CalculationReport, LocationReport};
use crate::utils::{format_quantity, format_rupees};

fn build(f: impl FnOnce(&mut String) -> fmt::Result) -> Result<String, fmt::Error> {
    let mut out = String::new();
    f(&mut out)?;
    Ok(out)
}

pub fn calculation(report: &CalculationReport) -> Result<String, fmt::Error> {
    build(|out| {
        let c = &report.calculation;
        let b = &c.breakdown_costs;

        writeln!(out, "Blueberry plot: {} acres at {}/kg", c.acres, format_rupees(c.price_per_kg))?;
        writeln!(
            out,
            "  Plants              {} ({} groups of 100)",
            format_quantity(c.plants.into()),
            c.plant_groups
        )?;
        writeln!(out, "  Setup cost          {}", format_rupees(c.setup_cost))?;
        writeln!(out, "  Annual operating    {}", format_rupees(c.annual_operating_cost))?;
        writeln!(out, "  Total investment    {}", format_rupees(c.total_cost))?;
        if let Some(per_plant) = c.cost_per_plant() {
            writeln!(out, "  Cost per plant      {}", format_rupees(per_plant))?;
        }

        writeln!(out, "\nSetup cost breakdown")?;
        for (name, amount) in [
            ("Polyhouse", b.polyhouse),
            ("Plants", b.plants),
            ("Soil preparation", b.soil_preparation),
            ("Irrigation", b.irrigation),
            ("Labor", b.labor),
            ("Transport", b.transport),
            ("Consulting", b.consulting),
            ("Contingency", b.contingency),
        ] {
            writeln!(out, "  {:<18}  {}", name, format_rupees(amount))?;
        }

        writeln!(out, "\nAt maturity")?;
        writeln!(out, "  Yield               {} kg", format_quantity(c.expected_yield))?;
        writeln!(out, "  Revenue             {}", format_rupees(c.expected_revenue))?;
        writeln!(out, "  Net profit          {}", format_rupees(c.net_profit))?;
        writeln!(out, "  ROI                 {} years", c.roi_years)?;
        writeln!(out, "  Payback             {} years", c.payback_period)?;
        writeln!(out, "  Simple return       {}% a year", c.irr)?;
        writeln!(out, "  5-year profit       {}", format_rupees(c.five_year_profit))?;
        writeln!(out, "  10-year profit      {}", format_rupees(c.ten_year_profit))?;
        writeln!(out, "  20-year profit      {}", format_rupees(c.twenty_year_profit))?;

        writeln!(out, "\nProjection")?;
        writeln!(
            out,
            "  {:>4}  {:>10}  {:>14}  {:>12}  {:>14}  {:>15}",
            "Year", "Yield kg", "Revenue", "Commission", "Net profit", "Cumulative"
        )?;
        for p in &c.projections {
            writeln!(
                out,
                "  {:>4}  {:>10}  {:>14}  {:>12}  {:>14}  {:>15}",
                p.year,
                format_quantity(p.yield_kg),
                format_rupees(p.revenue),
                format_rupees(p.fursat_commission),
                format_rupees(p.net_profit),
                format_rupees(p.cumulative_cash_flow),
            )?;
        }

        let s = &report.subsidy;
        writeln!(out, "\nGovernment subsidy")?;
        writeln!(out, "  Polyhouse           {}", format_rupees(s.polyhouse_subsidy))?;
        writeln!(out, "  Irrigation          {}", format_rupees(s.irrigation_subsidy))?;
        writeln!(out, "  Total               {}", format_rupees(s.total_subsidy))?;
        writeln!(out, "  Net investment      {}", format_rupees(s.net_investment))?;
        writeln!(out, "  ROI with subsidy    {} years", s.improved_roi)?;

        let scale = &report.scale;
        let verdict = if scale.recommended {
            "recommended"
        } else {
            "not recommended"
        };
        writeln!(out, "\nPlot size: {verdict}")?;
        writeln!(out, "  {}", scale.reason)?;
        for alt in &scale.alternatives {
            writeln!(out, "  - {alt}")?;
        }

        if let Some(id) = report.saved_id {
            writeln!(out, "\nSaved as calculation {id}")?;
        }
        Ok(())
    })
}

pub fn comparison(c: &TeaEstateComparison) -> Result<String, fmt::Error> {
    build(|out| {
        writeln!(out, "Blueberry vs tea estate, {} acres", c.acres)?;
        writeln!(out, "  {:<16}  {:>14}  {:>14}  {:>8}", "", "Blueberry", "Tea", "Ratio")?;
        for (name, blueberry, tea, ratio) in [
            ("Investment", c.blueberry.investment, c.tea.investment, c.investment_ratio),
            ("Annual revenue", c.blueberry.annual_revenue, c.tea.annual_revenue, c.revenue_ratio),
            ("Annual profit", c.blueberry.annual_profit, c.tea.annual_profit, c.profit_ratio),
        ] {
            writeln!(
                out,
                "  {:<16}  {:>14}  {:>14}  {:>7}x",
                name,
                format_rupees(blueberry),
                format_rupees(tea),
                ratio
            )?;
        }
        writeln!(
            out,
            "  {:<16}  {:>13}%  {:>13}%  {:>7}x",
            "ROI", c.blueberry.roi_percent, c.tea.roi_percent, c.roi_ratio
        )
    })
}

pub fn loan(l: &LoanEligibility) -> Result<String, fmt::Error> {
    build(|out| {
        let verdict = if l.eligible { "Eligible" } else { "Not eligible" };
        writeln!(out, "{verdict}")?;
        writeln!(out, "  Maximum loan        {}", format_rupees(l.max_loan))?;
        writeln!(
            out,
            "  Terms               {}% a year over {} years",
            l.interest_rate * rust_decimal::Decimal::ONE_HUNDRED,
            l.tenure_years
        )?;
        writeln!(out, "  Monthly EMI         {}", format_rupees(l.monthly_emi))?;
        writeln!(out, "  Total repayment     {}", format_rupees(l.total_repayment))?;
        writeln!(out, "  Total interest      {}", format_rupees(l.total_interest))
    })
}

fn write_location(
    out: &mut String,
    r: &LocationReport,
) -> fmt::Result {
    let a = &r.analysis;
    let heading = r.label.as_deref().unwrap_or(&a.location);
    writeln!(
        out,
        "{} ({:.4}, {:.4})",
        heading, r.coordinates.latitude, r.coordinates.longitude
    )?;
    writeln!(out, "  District            {}", a.district)?;
    writeln!(out, "  Suitability         {} (score {}/100)", a.suitability, r.suitability_score)?;
    writeln!(out, "  Climate score       {}", a.climate_score)?;
    writeln!(out, "  Soil pH             {:.1}", a.soil_ph)?;
    writeln!(out, "  Elevation           {} m", a.elevation)?;
    writeln!(out, "  Rainfall            {} mm", a.rainfall)?;
    writeln!(
        out,
        "  Temperature         {} to {} °C",
        a.temperature.min, a.temperature.max
    )?;
    writeln!(out, "  Recommendations")?;
    for tip in &r.recommendations {
        writeln!(out, "    - {tip}")?;
    }
    if let Some(id) = r.saved_id {
        writeln!(out, "  Saved as check {id}")?;
    }
    Ok(())
}

pub fn location(report: &LocationReport) -> Result<String, fmt::Error> {
    build(|out| write_location(out, report))
}

pub fn batch(reports: &[LocationReport]) -> Result<String, fmt::Error> {
    build(|out| {
        if reports.is_empty() {
            return writeln!(out, "No coordinates in file");
        }
        writeln!(
            out,
            "{:<24}  {:>9}  {:>9}  {:<12}  {:<10}  {:>5}",
            "Label", "Latitude", "Longitude", "District", "Tier", "Score"
        )?;
        for r in reports {
            writeln!(
                out,
                "{:<24}  {:>9.4}  {:>9.4}  {:<12}  {:<10}  {:>5}",
                r.label.as_deref().unwrap_or("-"),
                r.coordinates.latitude,
                r.coordinates.longitude,
                r.analysis.district,
                r.analysis.suitability,
                r.suitability_score
            )?;
        }
        Ok(())
    })
}

pub fn satellite(s: &SatelliteSuitability) -> Result<String, fmt::Error> {
    build(|out| {
        writeln!(
            out,
            "{} ({:.4}, {:.4})",
            s.region, s.coordinates.latitude, s.coordinates.longitude
        )?;
        writeln!(out, "  Suitability         {} (score {}/100)", s.suitability, s.score)?;
        writeln!(
            out,
            "  Soil                pH {:.1}, {}% organic matter, {}",
            s.soil.ph, s.soil.organic_matter_pct, s.soil.drainage
        )?;
        writeln!(
            out,
            "  Climate             {} °C average, {} mm rain, {}% humidity",
            s.climate.avg_temp_c, s.climate.annual_rainfall_mm, s.climate.humidity_pct
        )?;
        writeln!(
            out,
            "  Topography          {} m, {}° slope, {} facing",
            s.topography.elevation_m, s.topography.slope_deg, s.topography.aspect
        )?;
        writeln!(out, "  Valid until         {}", s.expires_at.format("%Y-%m-%d"))
    })
}

pub fn history(records: &[InvestmentRecord]) -> Result<String, fmt::Error> {
    build(|out| {
        if records.is_empty() {
            return writeln!(out, "No saved calculations");
        }
        writeln!(
            out,
            "{:>5}  {:<10}  {:<20}  {:>7}  {:>14}  {:>8}",
            "Id", "Date", "Investor", "Acres", "Total cost", "Payback"
        )?;
        for r in records {
            writeln!(
                out,
                "{:>5}  {:<10}  {:<20}  {:>7}  {:>14}  {:>8}",
                r.id,
                r.created_at.format("%Y-%m-%d"),
                r.investor_name.as_deref().unwrap_or("-"),
                r.acres,
                format_rupees(r.total_cost),
                r.payback_period
            )?;
        }
        Ok(())
    })
}

pub fn checks(checks: &[LocationCheck]) -> Result<String, fmt::Error> {
    build(|out| {
        if checks.is_empty() {
            return writeln!(out, "No saved location checks");
        }
        writeln!(
            out,
            "{:>5}  {:<10}  {:>9}  {:>9}  {:<12}  {:<10}  {:>5}",
            "Id", "Date", "Latitude", "Longitude", "District", "Tier", "Score"
        )?;
        for c in checks {
            writeln!(
                out,
                "{:>5}  {:<10}  {:>9.4}  {:>9.4}  {:<12}  {:<10}  {:>5}",
                c.id,
                c.created_at.format("%Y-%m-%d"),
                c.latitude,
                c.longitude,
                c.district,
                c.suitability,
                c.suitability_score
            )?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use darjberry_core::calculations::{
        calculate, calculate_loan_eligibility, calculate_subsidy_benefit,
        compare_with_tea_estate, get_scale_recommendation,
    };
    use darjberry_core::location::{GeospatialService, LocationAnalyzer};
    use darjberry_core::Coordinates;
    use rust_decimal_macros::dec;

    use super::*;

    fn one_acre_report() -> CalculationReport {
        let calculation = calculate(dec!(1), None);
        CalculationReport {
            subsidy: calculate_subsidy_benefit(&calculation),
            scale: get_scale_recommendation(dec!(1)),
            calculation,
            saved_id: Some(7),
        }
    }

    #[test]
    fn calculation_shows_headline_figures() {
        let text = calculation(&one_acre_report()).unwrap();

        assert!(text.contains("2,200 (22 groups of 100)"));
        assert!(text.contains("₹60,50,000"));
        assert!(text.contains("₹67,10,000"));
        assert!(text.contains("3.61 years"));
        assert!(text.contains("Plot size: recommended"));
        assert!(text.contains("Saved as calculation 7"));
    }

    #[test]
    fn calculation_lists_every_projection_year() {
        let text = calculation(&one_acre_report()).unwrap();
        let projection = text
            .split("\nProjection\n")
            .nth(1)
            .and_then(|rest| rest.split("\n\n").next())
            .expect("projection section");

        // header + 20 years
        assert_eq!(projection.lines().count(), 21);
    }

    #[test]
    fn comparison_shows_ratios() {
        let text = comparison(&compare_with_tea_estate(dec!(1), None)).unwrap();

        assert!(text.contains("22.37x"));
        assert!(text.contains("₹3,00,000"));
    }

    #[test]
    fn loan_shows_verdict_and_terms() {
        let text = loan(&calculate_loan_eligibility(dec!(1000000), dec!(1000000))).unwrap();

        assert!(text.starts_with("Eligible"));
        assert!(text.contains("8.5"));
        assert!(text.contains("7 years"));
    }

    #[test]
    fn location_lists_recommendations() {
        let analyzer = LocationAnalyzer::new();
        let analysis = analyzer.analyze(26.71, 88.43);
        let report = LocationReport {
            label: None,
            coordinates: Coordinates::new(26.71, 88.43),
            suitability_score: analyzer.suitability_score(&analysis),
            recommendations: analyzer.recommendations(&analysis),
            analysis,
            saved_id: None,
        };

        let text = location(&report).unwrap();

        assert!(text.starts_with("Siliguri, West Bengal (26.7100, 88.4300)"));
        assert!(text.contains("MODERATE (score 64/100)"));
        assert_eq!(text.matches("    - ").count(), 4);
    }

    #[test]
    fn write_errors_are_returned() {
        assert_eq!(build(|_| Err(fmt::Error)), Err(fmt::Error));
        assert_eq!(build(|out| out.write_str("ok")).as_deref(), Ok("ok"));
    }

    #[test]
    fn empty_lists_say_so() {
        assert_eq!(batch(&[]).unwrap(), "No coordinates in file\n");
        assert_eq!(history(&[]).unwrap(), "No saved calculations\n");
        assert_eq!(checks(&[]).unwrap(), "No saved location checks\n");
    }

    #[test]
    fn satellite_shows_region_and_expiry() {
        let report = GeospatialService::new().suitability(Coordinates::new(27.036, 88.2627));

        let text = satellite(&report).unwrap();

        assert!(text.starts_with("Darjeeling Hills"));
        assert!(text.contains("EXCELLENT (score 92/100)"));
        assert!(text.contains("Valid until"));
    }
}
