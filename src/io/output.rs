use crate::aqi::AqiCategory;
use crate::formatting::{FormattingConfig, Palette, Severity};
use crate::insights::InsightSource;
use crate::risk::{AssessmentReport, BasicRiskLevel, BasicRiskResult, LungRiskLevel};
use crate::weekly::{AverageRiskLevel, Trend, WeeklyReport};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Terminal,
}

pub trait OutputWriter {
    fn write_score(&mut self, result: &BasicRiskResult) -> anyhow::Result<()>;
    fn write_assessment(&mut self, report: &AssessmentReport) -> anyhow::Result<()>;
    fn write_weekly(&mut self, report: &WeeklyReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_score(&mut self, result: &BasicRiskResult) -> anyhow::Result<()> {
        self.write_json(result)
    }

    fn write_assessment(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        self.write_json(report)
    }

    fn write_weekly(&mut self, report: &WeeklyReport) -> anyhow::Result<()> {
        self.write_json(report)
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    palette: Palette,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        Self {
            writer,
            palette: Palette::new(formatting),
        }
    }

    fn heading(&mut self, title: &str) -> anyhow::Result<()> {
        let rule = "=".repeat(title.len());
        writeln!(self.writer, "{}", self.palette.header(title))?;
        writeln!(self.writer, "{}", self.palette.dim(&rule))?;
        Ok(())
    }

    fn bullets(&mut self, items: &[String]) -> anyhow::Result<()> {
        let bullet = self.palette.bullet();
        for item in items {
            writeln!(self.writer, "  {bullet} {item}")?;
        }
        Ok(())
    }
}

fn basic_severity(level: BasicRiskLevel) -> Severity {
    match level {
        BasicRiskLevel::Safe => Severity::Ok,
        BasicRiskLevel::Moderate => Severity::Caution,
        BasicRiskLevel::HighRisk => Severity::Danger,
    }
}

fn lung_severity(level: LungRiskLevel) -> Severity {
    match level {
        LungRiskLevel::Low => Severity::Ok,
        LungRiskLevel::Moderate => Severity::Caution,
        LungRiskLevel::High => Severity::Danger,
    }
}

fn average_severity(level: AverageRiskLevel) -> Severity {
    match level {
        AverageRiskLevel::Low => Severity::Ok,
        AverageRiskLevel::Moderate => Severity::Caution,
        AverageRiskLevel::High => Severity::Danger,
    }
}

fn aqi_severity(category: AqiCategory) -> Severity {
    match category {
        AqiCategory::Good | AqiCategory::Moderate => Severity::Ok,
        AqiCategory::UnhealthyForSensitiveGroups => Severity::Caution,
        _ => Severity::Danger,
    }
}

fn trend_severity(trend: Trend) -> Severity {
    match trend {
        Trend::Decreasing => Severity::Ok,
        Trend::Stable => Severity::Caution,
        Trend::Increasing => Severity::Danger,
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_score(&mut self, result: &BasicRiskResult) -> anyhow::Result<()> {
        let severity = basic_severity(result.risk_level);
        self.heading("Breathometer Risk Score")?;
        writeln!(
            self.writer,
            "{} Score: {:.2}  Level: {}",
            self.palette.marker(severity),
            result.risk_score,
            self.palette.severity(result.risk_level.label(), severity)
        )?;
        if result.alert_flag {
            writeln!(
                self.writer,
                "{}",
                self.palette
                    .severity("ALERT: combined risk exceeds 100", Severity::Danger)
            )?;
        }
        if !result.preventive_suggestions.is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "Suggestions:")?;
            self.bullets(&result.preventive_suggestions)?;
        }
        Ok(())
    }

    fn write_assessment(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        let assessment = &report.assessment;
        let severity = lung_severity(assessment.risk_level);

        self.heading("Lung Infection Risk")?;
        writeln!(
            self.writer,
            "{} {:.1}%  {}  {}",
            self.palette.marker(severity),
            assessment.risk_percentage,
            self.palette.bar(assessment.risk_percentage, 20),
            self.palette.severity(assessment.risk_level.label(), severity)
        )?;
        writeln!(
            self.writer,
            "AQI {:.0} ({})",
            report.aqi,
            self.palette
                .severity(report.aqi_category.label(), aqi_severity(report.aqi_category))
        )?;

        if let Some(breakdown) = &assessment.breakdown {
            writeln!(self.writer)?;
            writeln!(self.writer, "  Environment  {:>5.1}", breakdown.env_risk)?;
            writeln!(self.writer, "  Profile      {:>5.1}", breakdown.profile_risk)?;
            writeln!(self.writer, "  Symptoms     {:>5.1}", breakdown.symptom_risk)?;
        }

        writeln!(self.writer)?;
        writeln!(self.writer, "{}", assessment.explanation)?;
        Ok(())
    }

    fn write_weekly(&mut self, report: &WeeklyReport) -> anyhow::Result<()> {
        let severity = average_severity(report.avg_risk_level);

        self.heading("Weekly Lung Health Report")?;
        writeln!(
            self.writer,
            "{} Average risk {:.1}% ({})  Trend: {}",
            self.palette.marker(severity),
            report.avg_risk_percentage,
            self.palette.severity(&report.avg_risk_level.to_string(), severity),
            self.palette
                .severity(&report.trend.to_string(), trend_severity(report.trend))
        )?;
        writeln!(
            self.writer,
            "AQI {:.1} ({})  SpO2 {:.1}%  Cough {:.1}  Breathlessness {:.1}",
            report.avg_aqi,
            report.aqi_category,
            report.avg_spo2,
            report.avg_cough_severity,
            report.avg_breathlessness
        )?;
        writeln!(self.writer, "Dominant symptom: {}", report.highest_symptom)?;

        writeln!(self.writer)?;
        writeln!(self.writer, "Daily risk:")?;
        for snapshot in &report.daily_snapshots {
            let label = if snapshot.day + 1 == report.daily_snapshots.len() {
                "today".to_string()
            } else {
                format!("day {}", snapshot.day + 1)
            };
            writeln!(
                self.writer,
                "  {:<6} {} {:>5.1}%",
                label,
                self.palette.bar(snapshot.risk_percentage, 20),
                snapshot.risk_percentage
            )?;
        }

        writeln!(self.writer)?;
        writeln!(self.writer, "Disease risks:")?;
        for risk in &report.disease_risks {
            writeln!(
                self.writer,
                "  {:<30} {:>5.1}%",
                risk.name.name(),
                risk.risk_percentage
            )?;
        }

        writeln!(self.writer)?;
        writeln!(self.writer, "Insights:")?;
        self.bullets(&report.insights)?;

        writeln!(self.writer)?;
        writeln!(self.writer, "Recommendation: {}", report.recommendation)?;

        let source = match report.insight_source {
            InsightSource::Remote => "remote model",
            InsightSource::Fallback => "built-in rules",
        };
        writeln!(
            self.writer,
            "{}",
            self.palette.dim(&format!(
                "Insights from {source}, generated {}",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ))
        )?;
        Ok(())
    }
}

pub fn create_writer(format: OutputFormat, formatting: FormattingConfig) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(std::io::stdout())),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(std::io::stdout(), formatting)),
    }
}
