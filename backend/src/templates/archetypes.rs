//! Challenge-independent template pools

use super::{InterruptionArchetype, MessageTemplate, RequirementTemplate};
use crate::models::{
    ChangeImpact, ChangeType, InterruptionType, MessageImpact, MessageTiming, Priority,
};

pub static INTERRUPTION_ARCHETYPES: &[InterruptionArchetype] = &[
    InterruptionArchetype {
        interruption_type: InterruptionType::Slack,
        title: "Quick question in #engineering",
        description: "A teammate wants to know where the staging credentials live.",
        duration: 60,
        can_defer: true,
        priority: Priority::Low,
    },
    InterruptionArchetype {
        interruption_type: InterruptionType::Slack,
        title: "Code review requested",
        description: "Your review is blocking a colleague's pull request.",
        duration: 180,
        can_defer: true,
        priority: Priority::Medium,
    },
    InterruptionArchetype {
        interruption_type: InterruptionType::Email,
        title: "Quarterly security training",
        description: "Reminder: mandatory training must be completed this week.",
        duration: 30,
        can_defer: true,
        priority: Priority::Low,
    },
    InterruptionArchetype {
        interruption_type: InterruptionType::Email,
        title: "Customer escalation forwarded",
        description: "Support forwarded an angry customer thread for engineering input.",
        duration: 120,
        can_defer: true,
        priority: Priority::High,
    },
    InterruptionArchetype {
        interruption_type: InterruptionType::Meeting,
        title: "Impromptu standup",
        description: "The team lead pulled everyone into a five minute sync.",
        duration: 300,
        can_defer: false,
        priority: Priority::Medium,
    },
    InterruptionArchetype {
        interruption_type: InterruptionType::Meeting,
        title: "Sprint planning moved up",
        description: "Planning starts now instead of this afternoon.",
        duration: 600,
        can_defer: true,
        priority: Priority::Medium,
    },
    InterruptionArchetype {
        interruption_type: InterruptionType::Phone,
        title: "Call from the client",
        description: "The client is on the line asking for a status update.",
        duration: 240,
        can_defer: false,
        priority: Priority::High,
    },
    InterruptionArchetype {
        interruption_type: InterruptionType::SystemAlert,
        title: "Production error rate spike",
        description: "Error rate on the checkout service crossed 5%.",
        duration: 180,
        can_defer: false,
        priority: Priority::Urgent,
    },
    InterruptionArchetype {
        interruption_type: InterruptionType::SystemAlert,
        title: "CI pipeline failing on main",
        description: "The nightly build broke after the last merge.",
        duration: 120,
        can_defer: true,
        priority: Priority::High,
    },
];

pub static AMBIENT_CHATTER: &[MessageTemplate] = &[
    MessageTemplate {
        from: "Priya Natarajan",
        role: "Engineering Manager",
        message: "Reminder to update your ticket status before end of day.",
        priority: Priority::Low,
        timing: MessageTiming::Mid,
        requires_response: false,
        impact: None,
    },
    MessageTemplate {
        from: "Tom Becker",
        role: "QA Engineer",
        message: "Is this going to be ready for a test pass today?",
        priority: Priority::Medium,
        timing: MessageTiming::Mid,
        requires_response: true,
        impact: Some(MessageImpact::Timeline),
    },
    MessageTemplate {
        from: "Lena Park",
        role: "Designer",
        message: "Pushed a few tweaks to the mocks, take a look when you can.",
        priority: Priority::Low,
        timing: MessageTiming::Early,
        requires_response: false,
        impact: Some(MessageImpact::Scope),
    },
    MessageTemplate {
        from: "Marcus Reid",
        role: "DevOps Engineer",
        message: "Heads up: the deploy window closes 30 minutes earlier today.",
        priority: Priority::High,
        timing: MessageTiming::Late,
        requires_response: false,
        impact: Some(MessageImpact::Constraints),
    },
    MessageTemplate {
        from: "Sarah Chen",
        role: "Product Manager",
        message: "Can you confirm the acceptance criteria are still accurate?",
        priority: Priority::Medium,
        timing: MessageTiming::Early,
        requires_response: true,
        impact: Some(MessageImpact::Requirements),
    },
];

pub static GENERIC_REQUIREMENTS: &[RequirementTemplate] = &[
    RequirementTemplate {
        change_type: ChangeType::Addition,
        description: "Add input validation with user-facing error messages",
        impact: ChangeImpact::Moderate,
        time_to_implement: 10,
        stakeholder: "Sarah Chen",
        justification: "Support tickets show users submitting malformed data.",
    },
    RequirementTemplate {
        change_type: ChangeType::Modification,
        description: "Return results sorted by most recent first",
        impact: ChangeImpact::Minor,
        time_to_implement: 5,
        stakeholder: "Sarah Chen",
        justification: "Matches the ordering used everywhere else in the product.",
    },
    RequirementTemplate {
        change_type: ChangeType::Removal,
        description: "Drop the legacy CSV export path",
        impact: ChangeImpact::Minor,
        time_to_implement: 3,
        stakeholder: "David Okafor",
        justification: "Nobody has used it in six months.",
    },
    RequirementTemplate {
        change_type: ChangeType::Addition,
        description: "Log an audit event for every state change",
        impact: ChangeImpact::Major,
        time_to_implement: 20,
        stakeholder: "Compliance Team",
        justification: "Required for the upcoming SOC 2 audit.",
    },
];

/// Follow-up created when a requirements-impact message is handled
pub static CLARIFICATION_FOLLOWUP: RequirementTemplate = RequirementTemplate {
    change_type: ChangeType::Clarification,
    description: "Clarification needed on the requirements discussed in chat",
    impact: ChangeImpact::Minor,
    time_to_implement: 15,
    stakeholder: "Product Manager",
    justification: "Follow-up from stakeholder communication",
};
