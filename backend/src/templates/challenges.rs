//! Per-challenge scripts and presets

use super::{ChallengePreset, ChallengeScript, ConstraintTemplate, MessageTemplate, RequirementTemplate};
use crate::config::{InterruptionFrequency, RequirementStability, StakeholderActivity};
use crate::models::{
    ChangeImpact, ChangeType, ConstraintType, MessageImpact, MessageTiming, Priority, Severity,
};

const DEADLINE: ConstraintTemplate = ConstraintTemplate {
    id: "deadline",
    constraint_type: ConstraintType::Deadline,
    description: "Challenge deadline",
    fraction_of_duration: 1.0,
    severity: Severity::Warning,
};

pub static DEFAULT_SCRIPT: ChallengeScript = ChallengeScript {
    challenge_id: "default",
    title: "Generic workplace task",
    messages: &[
        MessageTemplate {
            from: "Sarah Chen",
            role: "Product Manager",
            message: "Hey! Just checking in on how the task is going.",
            priority: Priority::Medium,
            timing: MessageTiming::Early,
            requires_response: true,
            impact: None,
        },
        MessageTemplate {
            from: "Alex Rivera",
            role: "Tech Lead",
            message: "Make sure you cover the edge cases before you open the PR.",
            priority: Priority::Low,
            timing: MessageTiming::Mid,
            requires_response: false,
            impact: Some(MessageImpact::Scope),
        },
        MessageTemplate {
            from: "Sarah Chen",
            role: "Product Manager",
            message: "We need this wrapped up soon, the demo got moved up.",
            priority: Priority::High,
            timing: MessageTiming::Late,
            requires_response: true,
            impact: Some(MessageImpact::Timeline),
        },
    ],
    requirements: &[],
    preset: None,
};

pub static CHALLENGE_CATALOG: &[ChallengeScript] = &[
    ChallengeScript {
        challenge_id: "two-sum",
        title: "Two Sum",
        messages: &[
            MessageTemplate {
                from: "Alex Rivera",
                role: "Tech Lead",
                message: "Welcome aboard! Start with the brute force if you need to, then optimise.",
                priority: Priority::Low,
                timing: MessageTiming::Early,
                requires_response: false,
                impact: None,
            },
            MessageTemplate {
                from: "Alex Rivera",
                role: "Tech Lead",
                message: "Remember the input can contain negative numbers.",
                priority: Priority::Medium,
                timing: MessageTiming::Mid,
                requires_response: false,
                impact: Some(MessageImpact::Constraints),
            },
        ],
        requirements: &[RequirementTemplate {
            change_type: ChangeType::Clarification,
            description: "Return indices in ascending order",
            impact: ChangeImpact::Minor,
            time_to_implement: 2,
            stakeholder: "Alex Rivera",
            justification: "The downstream caller assumes sorted output.",
        }],
        preset: Some(ChallengePreset {
            interruption_frequency: InterruptionFrequency::Low,
            stakeholder_activity: StakeholderActivity::Quiet,
            requirement_stability: RequirementStability::Stable,
            constraints: &[DEADLINE],
        }),
    },
    ChallengeScript {
        challenge_id: "valid-parentheses",
        title: "Valid Parentheses",
        messages: &[
            MessageTemplate {
                from: "Alex Rivera",
                role: "Tech Lead",
                message: "This is going into the config parser, so think about performance.",
                priority: Priority::Medium,
                timing: MessageTiming::Early,
                requires_response: false,
                impact: Some(MessageImpact::Constraints),
            },
            MessageTemplate {
                from: "Sarah Chen",
                role: "Product Manager",
                message: "Could it also report where the first mismatch is?",
                priority: Priority::Medium,
                timing: MessageTiming::Mid,
                requires_response: true,
                impact: Some(MessageImpact::Requirements),
            },
        ],
        requirements: &[RequirementTemplate {
            change_type: ChangeType::Addition,
            description: "Support angle brackets as a fourth bracket type",
            impact: ChangeImpact::Minor,
            time_to_implement: 4,
            stakeholder: "Alex Rivera",
            justification: "The template language uses them.",
        }],
        preset: Some(ChallengePreset {
            interruption_frequency: InterruptionFrequency::Medium,
            stakeholder_activity: StakeholderActivity::Normal,
            requirement_stability: RequirementStability::Stable,
            constraints: &[DEADLINE],
        }),
    },
    ChallengeScript {
        challenge_id: "fix-login-bug",
        title: "Fix the login redirect loop",
        messages: &[
            MessageTemplate {
                from: "Jordan Blake",
                role: "Customer Success",
                message: "Three enterprise customers can't log in. This is urgent!",
                priority: Priority::Urgent,
                timing: MessageTiming::Early,
                requires_response: true,
                impact: Some(MessageImpact::Timeline),
            },
            MessageTemplate {
                from: "Alex Rivera",
                role: "Tech Lead",
                message: "I suspect the session cookie domain. Check the auth middleware first.",
                priority: Priority::High,
                timing: MessageTiming::Early,
                requires_response: false,
                impact: None,
            },
            MessageTemplate {
                from: "Sarah Chen",
                role: "Product Manager",
                message: "While you're in there, can SSO users skip the redirect entirely?",
                priority: Priority::Medium,
                timing: MessageTiming::Mid,
                requires_response: true,
                impact: Some(MessageImpact::Requirements),
            },
            MessageTemplate {
                from: "Jordan Blake",
                role: "Customer Success",
                message: "Any ETA I can pass on to the customers?",
                priority: Priority::High,
                timing: MessageTiming::Late,
                requires_response: true,
                impact: Some(MessageImpact::Timeline),
            },
        ],
        requirements: &[
            RequirementTemplate {
                change_type: ChangeType::Addition,
                description: "Add a regression test reproducing the redirect loop",
                impact: ChangeImpact::Moderate,
                time_to_implement: 8,
                stakeholder: "Alex Rivera",
                justification: "This bug has shipped twice before.",
            },
            RequirementTemplate {
                change_type: ChangeType::Modification,
                description: "Keep the old cookie name readable for one release",
                impact: ChangeImpact::Minor,
                time_to_implement: 4,
                stakeholder: "Marcus Reid",
                justification: "Rolling deploys will mix old and new pods.",
            },
        ],
        preset: Some(ChallengePreset {
            interruption_frequency: InterruptionFrequency::High,
            stakeholder_activity: StakeholderActivity::Active,
            requirement_stability: RequirementStability::Evolving,
            constraints: &[
                ConstraintTemplate {
                    id: "hotfix-deadline",
                    constraint_type: ConstraintType::Deadline,
                    description: "Hotfix must ship",
                    fraction_of_duration: 1.0,
                    severity: Severity::Critical,
                },
                ConstraintTemplate {
                    id: "customer-call",
                    constraint_type: ConstraintType::Meeting,
                    description: "Status call with affected customers",
                    fraction_of_duration: 0.5,
                    severity: Severity::Warning,
                },
            ],
        }),
    },
    ChallengeScript {
        challenge_id: "memory-leak-fix",
        title: "Track down the worker memory leak",
        messages: &[
            MessageTemplate {
                from: "Marcus Reid",
                role: "DevOps Engineer",
                message: "Workers are getting OOM-killed every couple of hours.",
                priority: Priority::High,
                timing: MessageTiming::Early,
                requires_response: false,
                impact: None,
            },
            MessageTemplate {
                from: "Marcus Reid",
                role: "DevOps Engineer",
                message: "I can raise the memory limit as a stopgap if you need more time.",
                priority: Priority::Medium,
                timing: MessageTiming::Mid,
                requires_response: true,
                impact: Some(MessageImpact::Constraints),
            },
            MessageTemplate {
                from: "Priya Natarajan",
                role: "Engineering Manager",
                message: "Leadership is asking for a root-cause write-up along with the fix.",
                priority: Priority::High,
                timing: MessageTiming::Late,
                requires_response: true,
                impact: Some(MessageImpact::Scope),
            },
        ],
        requirements: &[RequirementTemplate {
            change_type: ChangeType::Addition,
            description: "Expose a heap-usage metric from every worker",
            impact: ChangeImpact::Moderate,
            time_to_implement: 10,
            stakeholder: "Marcus Reid",
            justification: "We want to catch the next leak before it pages anyone.",
        }],
        preset: Some(ChallengePreset {
            interruption_frequency: InterruptionFrequency::Extreme,
            stakeholder_activity: StakeholderActivity::Active,
            requirement_stability: RequirementStability::Evolving,
            constraints: &[ConstraintTemplate {
                id: "incident-window",
                constraint_type: ConstraintType::Deadline,
                description: "Incident must be resolved",
                fraction_of_duration: 1.0,
                severity: Severity::Critical,
            }],
        }),
    },
    ChallengeScript {
        challenge_id: "add-dark-mode",
        title: "Add a dark mode toggle",
        messages: &[
            MessageTemplate {
                from: "Lena Park",
                role: "Designer",
                message: "Mocks for dark mode are in Figma. Use the new colour tokens, please.",
                priority: Priority::Medium,
                timing: MessageTiming::Early,
                requires_response: false,
                impact: Some(MessageImpact::Scope),
            },
            MessageTemplate {
                from: "Sarah Chen",
                role: "Product Manager",
                message: "Marketing wants the toggle to follow the OS setting by default.",
                priority: Priority::High,
                timing: MessageTiming::Mid,
                requires_response: true,
                impact: Some(MessageImpact::Requirements),
            },
            MessageTemplate {
                from: "Sarah Chen",
                role: "Product Manager",
                message: "We're demoing this to the CEO, can we make sure it looks polished?",
                priority: Priority::High,
                timing: MessageTiming::Late,
                requires_response: false,
                impact: Some(MessageImpact::Timeline),
            },
        ],
        requirements: &[
            RequirementTemplate {
                change_type: ChangeType::Addition,
                description: "Persist the theme choice across sessions",
                impact: ChangeImpact::Moderate,
                time_to_implement: 8,
                stakeholder: "Sarah Chen",
                justification: "Users complained the setting resets on reload.",
            },
            RequirementTemplate {
                change_type: ChangeType::Modification,
                description: "Use a high-contrast palette instead of plain dark grey",
                impact: ChangeImpact::Minor,
                time_to_implement: 5,
                stakeholder: "Lena Park",
                justification: "Accessibility review flagged the contrast ratio.",
            },
            RequirementTemplate {
                change_type: ChangeType::Addition,
                description: "Add a scheduled mode that switches at sunset",
                impact: ChangeImpact::Major,
                time_to_implement: 20,
                stakeholder: "Sarah Chen",
                justification: "A competitor just shipped it.",
            },
        ],
        preset: Some(ChallengePreset {
            interruption_frequency: InterruptionFrequency::Medium,
            stakeholder_activity: StakeholderActivity::Active,
            requirement_stability: RequirementStability::Volatile,
            constraints: &[
                DEADLINE,
                ConstraintTemplate {
                    id: "ceo-demo",
                    constraint_type: ConstraintType::Demo,
                    description: "Demo to the CEO",
                    fraction_of_duration: 0.8,
                    severity: Severity::Critical,
                },
            ],
        }),
    },
    ChallengeScript {
        challenge_id: "shopping-cart-feature",
        title: "Build the shopping cart",
        messages: &[
            MessageTemplate {
                from: "Sarah Chen",
                role: "Product Manager",
                message: "The cart needs add, remove and quantity updates for the MVP.",
                priority: Priority::High,
                timing: MessageTiming::Early,
                requires_response: false,
                impact: Some(MessageImpact::Scope),
            },
            MessageTemplate {
                from: "David Okafor",
                role: "Client",
                message: "Our customers will definitely want discount codes at launch.",
                priority: Priority::High,
                timing: MessageTiming::Mid,
                requires_response: true,
                impact: Some(MessageImpact::Requirements),
            },
            MessageTemplate {
                from: "Tom Becker",
                role: "QA Engineer",
                message: "I need at least ten minutes before release to run the checkout suite.",
                priority: Priority::Medium,
                timing: MessageTiming::Mid,
                requires_response: false,
                impact: Some(MessageImpact::Constraints),
            },
            MessageTemplate {
                from: "David Okafor",
                role: "Client",
                message: "Actually, can we launch without guest checkout?",
                priority: Priority::Medium,
                timing: MessageTiming::Late,
                requires_response: true,
                impact: Some(MessageImpact::Requirements),
            },
        ],
        requirements: &[
            RequirementTemplate {
                change_type: ChangeType::Addition,
                description: "Support percentage and fixed-amount discount codes",
                impact: ChangeImpact::Major,
                time_to_implement: 25,
                stakeholder: "David Okafor",
                justification: "Launch promotion depends on it.",
            },
            RequirementTemplate {
                change_type: ChangeType::Removal,
                description: "Remove guest checkout from the first release",
                impact: ChangeImpact::Minor,
                time_to_implement: 3,
                stakeholder: "David Okafor",
                justification: "Legal has not signed off on guest data retention.",
            },
            RequirementTemplate {
                change_type: ChangeType::Modification,
                description: "Cap item quantity at 10 per line",
                impact: ChangeImpact::Minor,
                time_to_implement: 4,
                stakeholder: "Sarah Chen",
                justification: "Inventory team asked for it after last sale.",
            },
        ],
        preset: Some(ChallengePreset {
            interruption_frequency: InterruptionFrequency::High,
            stakeholder_activity: StakeholderActivity::Chaotic,
            requirement_stability: RequirementStability::Volatile,
            constraints: &[
                DEADLINE,
                ConstraintTemplate {
                    id: "release-cut",
                    constraint_type: ConstraintType::Release,
                    description: "Release branch cut",
                    fraction_of_duration: 0.9,
                    severity: Severity::Critical,
                },
            ],
        }),
    },
    ChallengeScript {
        challenge_id: "api-rate-limiter",
        title: "Add rate limiting to the public API",
        messages: &[
            MessageTemplate {
                from: "Alex Rivera",
                role: "Tech Lead",
                message: "A token bucket per API key should be enough for now.",
                priority: Priority::Medium,
                timing: MessageTiming::Early,
                requires_response: false,
                impact: None,
            },
            MessageTemplate {
                from: "Marcus Reid",
                role: "DevOps Engineer",
                message: "Remember we run four replicas, local counters won't cut it.",
                priority: Priority::High,
                timing: MessageTiming::Mid,
                requires_response: true,
                impact: Some(MessageImpact::Constraints),
            },
        ],
        requirements: &[RequirementTemplate {
            change_type: ChangeType::Addition,
            description: "Return Retry-After headers on rejected requests",
            impact: ChangeImpact::Minor,
            time_to_implement: 4,
            stakeholder: "Alex Rivera",
            justification: "SDK clients need it to back off correctly.",
        }],
        preset: Some(ChallengePreset {
            interruption_frequency: InterruptionFrequency::Medium,
            stakeholder_activity: StakeholderActivity::Normal,
            requirement_stability: RequirementStability::Evolving,
            constraints: &[DEADLINE],
        }),
    },
];
