//! Prompt sent to the model to obtain a plan.
//!
//! The prompt encodes the planning policy the parser later relies on: the
//! JSON keys, the step limit, the agent names and the two exception
//! suffixes for steps no tool can serve.

use super::parser::MAX_PLAN_STEPS;
use crate::agents::{AvailableAgents, GENERIC_AGENT, HUMAN_AGENT};

/// Appended to actions handed to the generic fallback agent.
pub const GENERIC_EXCEPTION: &str =
    "EXCEPTION: No suitable function found. A generic LLM model is being used for this step.";

/// Appended to actions escalated to a human.
pub const HUMAN_EXCEPTION: &str =
    "EXCEPTION: Human support required to do this step, no suitable function found.";

/// Shown in place of the tool list when no tools are configured.
pub const NO_TOOLS_PLACEHOLDER: &str = "Various specialized tools";

const RESPONSE_FORMAT: &str = r#"{
  "initial_goal": "The goal of the plan",
  "steps": [
    {
      "action": "Detailed description of the step action",
      "agent": "AgentName"
    }
  ],
  "summary_plan_and_steps": "Brief summary of the plan and steps",
  "human_clarification_request": "Any additional information needed from the human"
}"#;

/// Renders the planning prompt for `objective`.
///
/// Each entry of `tools` is one line describing a function an agent can
/// call.
pub fn generate_instruction(objective: &str, agents: &AvailableAgents, tools: &[String]) -> String {
    let agent_list = agents.to_string();
    let tool_list = if tools.is_empty() {
        NO_TOOLS_PLACEHOLDER.to_string()
    } else {
        tools.join("\n")
    };

    format!(
        "You are the Planner, an AI orchestrator that manages a group of AI agents to accomplish tasks.

For the given objective, come up with a simple step-by-step plan.
This plan should involve individual tasks that, if executed correctly, will yield the correct answer. Do not add any superfluous steps.
The result of the final step should be the final answer. Make sure that each step has all the information needed - do not skip steps.

These actions are passed to the specific agent. Make sure the action contains all the information required for the agent to execute the task.

Your objective is:
{objective}

The agents you have access to are:
{agent_list}

These agents have access to the following functions:
{tool_list}

The first step of your plan should be to ask the user for any additional information required to progress the rest of steps planned.

Only use the functions provided as part of your plan.

Do not add superfluous steps - only take the most direct path to the solution, with the minimum number of steps. Only do the minimum necessary to complete the goal.

If there is a single function call that can directly solve the task, only generate a plan with a single step. For example, if someone asks to be granted access to a database, generate a plan with only one step involving the grant_database_access function, with no additional steps.

When generating the action in the plan, frame the action as an instruction you are passing to the agent to execute. It should be a short, single sentence. Include the function to use. For example, \"Set up an Office 365 Account for Jessica Smith. Function: set_up_office_365_account\"

Ensure the summary of the plan and the overall steps is less than 50 words.

Identify any additional information that might be required to complete the task. Include this information in the plan in the human_clarification_request field of the plan. If it is not required, leave it as null. Do not include information that you are waiting for clarification on in the string of the action field, as this otherwise won't get updated.

You must prioritise using the provided functions to accomplish each step. First evaluate each and every function the agents have access to. Only if you cannot find a function needed to complete the task, and you have reviewed each and every function and determined why each is not suitable, there are two options you can take when generating the plan.
First evaluate whether the step could be handled by a typical large language model, without any specialised functions. For example, tasks such as \"add 32 to 54\", or \"convert this SQL code to a python script\", or \"write a 200 word story about a fictional product strategy\".
If a general Large Language Model CAN handle the step, add a step to the plan with the action you believe would be needed, and add \"{GENERIC_EXCEPTION}\" to the end of the action. Assign these steps to the {GENERIC_AGENT}.
Alternatively, if a general Large Language Model CAN NOT handle the step, add a step to the plan with the action you believe would be needed, and add \"{HUMAN_EXCEPTION}\" to the end of the action. Assign these steps to the {HUMAN_AGENT}.

Limit the plan to {MAX_PLAN_STEPS} steps or less.

Choose from {agent_list} ONLY for planning your steps.

Return your response as a JSON object with the following structure:
{RESPONSE_FORMAT}
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_lists_agents_and_objective() {
        let agents = AvailableAgents::default();
        let prompt = generate_instruction("Onboard Jessica Smith", &agents, &[]);

        assert!(prompt.contains("Your objective is:\nOnboard Jessica Smith\n"));
        assert!(prompt.contains(
            "HumanAgent, HrAgent, MarketingAgent, ProductAgent, ProcurementAgent, TechSupportAgent, GenericAgent"
        ));
        assert!(prompt.contains("Limit the plan to 6 steps or less."));
    }

    #[test]
    fn test_instruction_placeholder_without_tools() {
        let prompt = generate_instruction("x", &AvailableAgents::default(), &[]);
        assert!(prompt.contains(NO_TOOLS_PLACEHOLDER));
    }

    #[test]
    fn test_instruction_lists_each_tool_on_its_own_line() {
        let tools = vec![
            "HrAgent: schedule_orientation_session".to_string(),
            "TechSupportAgent: set_up_office_365_account".to_string(),
        ];
        let prompt = generate_instruction("x", &AvailableAgents::default(), &tools);
        assert!(prompt.contains(
            "HrAgent: schedule_orientation_session\nTechSupportAgent: set_up_office_365_account"
        ));
        assert!(!prompt.contains(NO_TOOLS_PLACEHOLDER));
    }

    #[test]
    fn test_instruction_encodes_response_contract() {
        let prompt = generate_instruction("x", &AvailableAgents::default(), &[]);
        for key in [
            "\"initial_goal\"",
            "\"steps\"",
            "\"action\"",
            "\"agent\"",
            "\"summary_plan_and_steps\"",
            "\"human_clarification_request\"",
        ] {
            assert!(prompt.contains(key), "missing {key}");
        }
        assert!(prompt.contains(GENERIC_EXCEPTION));
        assert!(prompt.contains(HUMAN_EXCEPTION));
        assert!(prompt.contains("less than 50 words"));
    }

    #[test]
    fn test_instruction_is_pure() {
        let agents = AvailableAgents::new(["HrAgent"]);
        assert_eq!(
            generate_instruction("a", &agents, &[]),
            generate_instruction("a", &agents, &[])
        );
    }
}
