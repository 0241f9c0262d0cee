//! Forensic audit of a single ranked result.
//!
//! The auditor turns a [`RankedResult`] into a plain-text brief, wraps it in
//! an adversarial review prompt, and hands it to an [`Llm`]. The answer is
//! returned verbatim; nothing here interprets it.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::candidate::RankedResult;
use crate::error::{Error, Result};
use crate::port::outbound::llm::Llm;

/// The fields of a ranked result the auditor gets to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditBrief {
    pub title: String,
    pub description: String,
    pub outcome: String,
    pub entry_price: Decimal,
    pub end_date: String,
    pub days_left: i64,
    pub max_liquidity: Decimal,
    pub volume: Decimal,
    pub roi_pct: Decimal,
    pub slippage: Decimal,
}

impl From<&RankedResult> for AuditBrief {
    fn from(result: &RankedResult) -> Self {
        Self {
            title: result.candidate.title.clone(),
            description: result.candidate.description.clone(),
            outcome: result.candidate.outcome.clone(),
            entry_price: result.entry_price,
            end_date: result.candidate.end_date.clone(),
            days_left: result.candidate.days_left,
            max_liquidity: result.max_liquidity,
            volume: result.candidate.volume,
            roi_pct: result.roi_pct,
            slippage: result.slippage,
        }
    }
}

impl fmt::Display for AuditBrief {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hundred = Decimal::ONE_HUNDRED;
        writeln!(f, "MARKET: {}", self.title)?;
        writeln!(f, "DESCRIPTION: {}", self.description)?;
        writeln!(f, "OUTCOME: {}", self.outcome)?;
        writeln!(
            f,
            "ENTRY PRICE: {} (implied probability {}%)",
            self.entry_price.round_dp(4),
            (self.entry_price * hundred).round_dp(1)
        )?;
        writeln!(
            f,
            "RESOLUTION DATE: {} (about {} days)",
            self.end_date, self.days_left
        )?;
        writeln!(f, "LIQUIDITY DEPTH: ${}", self.max_liquidity.round_dp(2))?;
        writeln!(f, "TOTAL VOLUME: ${}", self.volume.round_dp(2))?;
        writeln!(f, "POTENTIAL ROI: {}%", self.roi_pct.round_dp(2))?;
        write!(f, "SLIPPAGE ESTIMATE: {}%", (self.slippage * hundred).round_dp(2))
    }
}

/// Build the review prompt for one brief.
#[must_use]
pub fn audit_prompt(brief: &AuditBrief, today: NaiveDate) -> String {
    format!(
        "# ROLE
You are a forensic auditor and adversarial risk manager for prediction markets.
Assume the market below is a trap until the evidence says otherwise. You are
looking for reasons to refuse the trade, not to take it.

# CONTEXT
Today is {today}. Use the current 3-month US Treasury bill yield as the
risk-free rate.

# MARKET
{brief}

# TASK
1. Classify the market: polling or election, procedural or legal, corporate
   or economic data, or geopolitical conflict.
2. Name the authoritative source that will settle it and say how a stale or
   partisan source could mislead a trader here.
3. Look for the failure mode: delays, lawsuits, injunctions, recounts,
   violations of agreements, or wording in the resolution rules that could
   settle against the outcome.
4. Check the arithmetic: does buying at {entry} with {days} days left beat
   the risk-free rate by a margin that justifies the tail risk?

# OUTPUT
Reply in Markdown with these sections:
1. **Classification**
2. **Verdict** (KILL, WARNING or APPROVED)
3. **Risk Analysis** (bullet points)
4. **Execution Check**
",
        today = today.format("%Y-%m-%d"),
        brief = brief,
        entry = brief.entry_price.round_dp(4),
        days = brief.days_left,
    )
}

/// Sends briefs to a language model.
pub struct Auditor {
    llm: Arc<dyn Llm>,
}

impl Auditor {
    #[must_use]
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self { llm }
    }

    /// Audit a result, dating the prompt with today's UTC date.
    ///
    /// # Errors
    ///
    /// Propagates provider failures. An empty answer is an
    /// [`Error::Llm`].
    pub async fn audit(&self, result: &RankedResult) -> Result<String> {
        self.audit_on(result, Utc::now().date_naive()).await
    }

    /// Audit a result with an explicit date.
    ///
    /// # Errors
    ///
    /// See [`Auditor::audit`].
    pub async fn audit_on(&self, result: &RankedResult, today: NaiveDate) -> Result<String> {
        let brief = AuditBrief::from(result);
        info!(
            provider = self.llm.name(),
            title = %brief.title,
            "Requesting forensic audit"
        );

        let answer = self.llm.complete(&audit_prompt(&brief, today)).await?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(Error::Llm("empty audit response".into()));
        }
        Ok(answer.to_string())
    }
}
