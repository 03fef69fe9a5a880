use super::domain::{ResultProfile, Role, RoleProfile, TypeCode};
use std::collections::HashMap;
use std::sync::OnceLock;

static PROFILE_INDEX: OnceLock<HashMap<&'static str, &'static ResultProfile>> = OnceLock::new();

/// Profile returned for any code missing from the table.
pub static FALLBACK_PROFILE: ResultProfile = ResultProfile {
    title: "The Flexible Agent",
    description: "Your answers do not settle into a single pattern. You adapt to whatever the round needs and can slot into any composition without friction.",
    advice: Some("Keep a comfort pick in every role so you can fill whatever your team is missing."),
};

static PROFILES: &[(&str, ResultProfile)] = &[
    (
        "ALST",
        ResultProfile {
            title: "The Tactical Spearhead",
            description: "You take first contact on purpose, with a plan behind it. Calm under fire and always feeding information back to the team, you turn aggression into a repeatable site take.",
            advice: Some("Call your entry before you take it so trades are lined up the moment you swing."),
        },
    ),
    (
        "ALSC",
        ResultProfile {
            title: "The Calculated Assassin",
            description: "You pick your fights precisely and execute them without hesitation. Teammates are welcome to follow, but you will win the duel either way.",
            advice: Some("Share the timing you read off the enemy so the rest of the team can punish it too."),
        },
    ),
    (
        "ALET",
        ResultProfile {
            title: "The Rallying Vanguard",
            description: "You lead from the front and your energy is contagious. Structured plays plus loud comms keep everyone moving in the same direction.",
            advice: Some("After a lost round, reset the mood first and the strategy second."),
        },
    ),
    (
        "ALEC",
        ResultProfile {
            title: "The Fiery Duelist",
            description: "You know exactly which angle you want and you want it now. Momentum is your weapon and a highlight round is never far away.",
            advice: Some("Take one deep breath before the clutch; your aim is already good enough."),
        },
    ),
    (
        "AIST",
        ResultProfile {
            title: "The Silent Breacher",
            description: "You read the round by feel and move the moment it opens up, bringing teammates along without needing many words.",
            advice: Some("Say one word when you commit. Even a short call doubles the value of your instinct."),
        },
    ),
    (
        "AISC",
        ResultProfile {
            title: "The Lone Wolf Hunter",
            description: "Instinct-driven, unshakable and happiest in the open. You find the flank nobody expected and close it out yourself.",
            advice: Some("Lurk with a timer in mind so your pick lands while the team is still alive to use it."),
        },
    ),
    (
        "AIET",
        ResultProfile {
            title: "The Hype Initiator",
            description: "You feel the moment to go and drag the whole team into it. When you are on form the server is loud and the rounds come fast.",
            advice: Some("Pair your instinct with utility; a flash before the swing turns enthusiasm into kills."),
        },
    ),
    (
        "AIEC",
        ResultProfile {
            title: "The Wildcard",
            description: "Unpredictable to enemies and sometimes to your own team. You make plays nobody else would try and a surprising number of them work.",
            advice: Some("Tell the team when you are going off-script so they can play around the chaos."),
        },
    ),
    (
        "PLST",
        ResultProfile {
            title: "The Strategic Anchor",
            description: "You hold ground with discipline and think two rounds ahead. Your calm calls are the backbone of every retake.",
            advice: Some("Trust your read and rotate early; your team will follow a confident call."),
        },
    ),
    (
        "PLSC",
        ResultProfile {
            title: "The Sentinel Fortress",
            description: "Your site is your responsibility and very little gets past it. Patient, methodical and self-reliant, you win rounds by simply not losing them.",
            advice: Some("Vary your setups every few rounds so your reliability does not become predictable."),
        },
    ),
    (
        "PLET",
        ResultProfile {
            title: "The Shotcaller",
            description: "You see the whole map and you care how everyone is doing. Measured pacing and honest comms make you the natural in-game leader.",
            advice: Some("Keep calls short in the heat of the round and save the breakdown for the buy phase."),
        },
    ),
    (
        "PLEC",
        ResultProfile {
            title: "The Perfectionist Controller",
            description: "Every smoke has its lineup and every lineup has its reason. You feel a misplay keenly because you know exactly how it should have gone.",
            advice: Some("Forgive the imperfect round; a slightly late smoke is still better than none."),
        },
    ),
    (
        "PIST",
        ResultProfile {
            title: "The Quiet Supporter",
            description: "You sense what the team needs and quietly provide it. Your utility lands at the right moment without anyone having asked for it.",
            advice: Some("Ask for the resources you need as well; supporters win more when they are supported."),
        },
    ),
    (
        "PISC",
        ResultProfile {
            title: "The Patient Lurker",
            description: "You wait in places no one checks and strike once the enemy has forgotten you exist. Composure is your edge.",
            advice: Some("Call out what you see while you wait; your information is worth as much as your picks."),
        },
    ),
    (
        "PIET",
        ResultProfile {
            title: "The Team Heart",
            description: "You keep morale high and notice when someone is tilting. Your instinct is for people as much as for rounds.",
            advice: Some("Back your empathy with one clear plan per half so the team has something to rally around."),
        },
    ),
    (
        "PIEC",
        ResultProfile {
            title: "The Free Spirit",
            description: "You play by feel and on your own terms. When the vibe is right you are the most dangerous player on the server.",
            advice: Some("Warm up before ranked so your good days stop depending on luck."),
        },
    ),
];

fn profile_index() -> &'static HashMap<&'static str, &'static ResultProfile> {
    PROFILE_INDEX.get_or_init(|| PROFILES.iter().map(|(code, profile)| (*code, profile)).collect())
}

/// Looks up the profile for any code, falling back to [`FALLBACK_PROFILE`].
pub fn resolve(code: &str) -> &'static ResultProfile {
    lookup(code).unwrap_or(&FALLBACK_PROFILE)
}

pub fn resolve_type_code(code: &TypeCode) -> &'static ResultProfile {
    resolve(code.as_str())
}

/// Exact-match lookup without fallback.
pub fn lookup(code: &str) -> Option<&'static ResultProfile> {
    profile_index().get(code).copied()
}

/// Every tabled profile in display order.
pub fn all() -> impl Iterator<Item = (&'static str, &'static ResultProfile)> {
    PROFILES.iter().map(|(code, profile)| (*code, profile))
}

pub const fn role_profile(role: Role) -> RoleProfile {
    match role {
        Role::Duelist => RoleProfile {
            role,
            summary: "Self-sufficient fragger who takes first contact and creates space.",
            example_agents: &["Jett", "Reyna", "Raze", "Phoenix", "Neon", "Yoru", "Iso"],
        },
        Role::Initiator => RoleProfile {
            role,
            summary: "Sets up fights with information and disruption so the team can commit.",
            example_agents: &["Sova", "Breach", "Skye", "KAY/O", "Fade", "Gekko"],
        },
        Role::Controller => RoleProfile {
            role,
            summary: "Shapes the map with smokes and walls and sets the tempo of the round.",
            example_agents: &["Brimstone", "Omen", "Viper", "Astra", "Harbor", "Clove"],
        },
        Role::Sentinel => RoleProfile {
            role,
            summary: "Locks down sites and watches flanks, trading speed for reliability.",
            example_agents: &["Sage", "Cypher", "Killjoy", "Chamber", "Deadlock", "Vyse"],
        },
    }
}
