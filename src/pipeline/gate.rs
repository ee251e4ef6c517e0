//! Gate decision: should this question trigger web search?

use tracing::debug;

use crate::error::Result;
use crate::pipeline::prompts::format_gate_prompt;
use crate::traits::CompletionModel;
use crate::types::RunContext;

/// Decide whether web search is needed to answer the question.
///
/// The model is asked to answer strictly `YES` or `NO`; the result is
/// `true` iff the trimmed, uppercased reply equals `YES`. Any other
/// reply, malformed output included, is treated as `false`: ambiguous
/// output skips search rather than erroring. Transport failures still
/// propagate.
pub async fn decide_should_search(
    model: &dyn CompletionModel,
    question: &str,
    ctx: &RunContext,
) -> Result<bool> {
    let reply = model
        .complete(&format_gate_prompt(&ctx.today, question))
        .await?;

    let decision = reply.trim().to_uppercase() == "YES";
    debug!(decision, reply = %reply.trim(), "gate decided");
    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockModel;
    use chrono::NaiveDate;

    fn ctx() -> RunContext {
        RunContext::for_date(NaiveDate::from_ymd_opt(2026, 8, 30).unwrap())
    }

    #[tokio::test]
    async fn test_yes_reply_triggers_search() {
        for reply in ["YES", "yes", "  Yes \n"] {
            let model = MockModel::new().with_reply(reply);
            assert!(
                decide_should_search(&model, "latest rust release?", &ctx())
                    .await
                    .unwrap(),
                "reply {reply:?} should gate to true"
            );
        }
    }

    #[tokio::test]
    async fn test_anything_else_skips_search() {
        for reply in ["NO", "no", "YES.", "maybe", "YES, because...", "", "Y"] {
            let model = MockModel::new().with_reply(reply);
            assert!(
                !decide_should_search(&model, "what is a btree?", &ctx())
                    .await
                    .unwrap(),
                "reply {reply:?} should gate to false"
            );
        }
    }

    #[tokio::test]
    async fn test_prompt_carries_date_and_question() {
        let model = MockModel::new().with_reply("NO");
        decide_should_search(&model, "what is a btree?", &ctx())
            .await
            .unwrap();

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("2026-08-30"));
        assert!(prompts[0].contains("what is a btree?"));
    }
}
