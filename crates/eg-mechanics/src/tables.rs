//! Attribute derivation tables.
//!
//! Pure functions from rolled stats and skills to derived attributes. The
//! numbers are fixed constants of the rule system.

use eg_core::{WeaponReach, WeaponSize};

/// Damage modifier steps, indexed by combined STR+SIZ.
pub const DAMAGE_STEPS: [&str; 35] = [
    "-1d8", "-1d6", "-1d4", "-1d2", "+0", "+1d2", "+1d4", "+1d6", "+1d8", "+1d10", "+1d12",
    "+2d6", "+1d8+1d6", "+2d8", "+1d10+1d8", "+2d10", "+2d10+1d2", "+2d10+1d4", "+2d10+1d6",
    "+2d10+1d8", "+3d10", "+3d10+1d2", "+3d10+1d4", "+3d10+1d6", "+3d10+1d8", "+4d10",
    "+4d10+1d2", "+4d10+1d4", "+4d10+1d6", "+4d10+1d8", "+5d10", "+5d10+1d2", "+5d10+1d4",
    "+5d10+1d6", "+5d10+1d8",
];

/// Spirit damage, indexed by Spectral Combat / 20 rounded up.
pub const SPIRIT_DAMAGE: [&str; 18] = [
    "0", "1d2", "1d4", "1d6", "1d8", "1d10", "2d6", "1d8+1d6", "2d8", "1d10+1d8", "2d10",
    "2d10+1d2", "2d10+1d4", "2d10+1d6", "2d10+1d8", "3d10", "3d10+1d2", "3d10+1d4",
];

/// Devotional pool multiplier, in quarters of POW, per cult rank.
const DEVOTION_QUARTERS: [i32; 6] = [0, 0, 1, 2, 3, 4];

/// Bound spirit multiplier, in quarters of CHA, per cult rank.
const SPIRIT_QUARTERS: [i32; 6] = [0, 1, 2, 3, 4, 4];

/// Integer division rounding up, for non-negative divisors.
pub fn div_ceil(n: i32, d: i32) -> i32 {
    n.div_euclid(d).saturating_add(i32::from(n.rem_euclid(d) != 0))
}

/// Hit points every location starts from.
pub fn base_hit_points(con: i32, siz: i32) -> i32 {
    con.saturating_add(siz).saturating_sub(1).div_euclid(5) + 1
}

/// Damage modifier for a STR and SIZ pair.
pub fn damage_modifier(str: i32, siz: i32) -> &'static str {
    if str == 0 || siz == 0 {
        return "+0";
    }
    let sum = str.saturating_add(siz);
    let index = if sum <= 50 {
        sum.saturating_sub(1).div_euclid(5)
    } else {
        (sum - 51).div_euclid(10) + 10
    };
    let last = DAMAGE_STEPS.len() - 1;
    DAMAGE_STEPS[usize::try_from(index).unwrap_or(0).min(last)]
}

/// Action points of a corporeal creature, from DEX+INT.
pub fn action_points(dex_int: i32) -> i32 {
    match dex_int {
        n if n <= 12 => 1,
        n if n <= 24 => 2,
        n if n <= 36 => 3,
        _ => 4,
    }
}

/// Action points of a spirit, from POW+INT.
pub fn spirit_action_points(pow_int: i32) -> i32 {
    match pow_int {
        n if n <= 12 => 1,
        n if n <= 24 => 2,
        n if n <= 36 => 3,
        n if n <= 48 => 4,
        _ => 5,
    }
}

/// Strike rank before armor, `(INT+DEX)/2`.
pub fn natural_strike_rank(int: i32, dex: i32) -> i32 {
    int.saturating_add(dex).div_euclid(2)
}

/// Strike rank of a spirit, `(INT+CHA)/2`.
pub fn spirit_strike_rank(int: i32, cha: i32) -> i32 {
    int.saturating_add(cha).div_euclid(2)
}

/// Strike rank penalty of worn armor. Each value is a location's armor
/// above its natural baseline.
pub fn encumbrance_penalty(worn_armor: impl IntoIterator<Item = i32>) -> i32 {
    let load = worn_armor
        .into_iter()
        .map(|ap| match ap {
            1 => 2,
            ap if ap > 1 => ap - 1,
            _ => 0,
        })
        .fold(0, i32::saturating_add);
    div_ceil(load, 5)
}

/// Devotional pool for a POW and cult rank.
pub fn devotional_pool(pow: i32, cult_rank: u8) -> i32 {
    div_ceil(pow.saturating_mul(DEVOTION_QUARTERS[rank_index(cult_rank)]), 4)
}

/// Number of spirits a binder can control.
pub fn max_spirits(cha: i32, cult_rank: u8) -> i32 {
    div_ceil(cha.saturating_mul(SPIRIT_QUARTERS[rank_index(cult_rank)]), 4)
}

/// Highest POW of a spirit a binder can hold.
pub fn max_bound_pow(binding: i32) -> i32 {
    div_ceil(binding, 10).saturating_mul(3)
}

/// Intensity cap derived from a skill: the skill divided by `divisor`,
/// rounded up.
pub fn skill_cap(skill: i32, divisor: i32) -> i32 {
    div_ceil(skill, divisor)
}

/// Spirit damage for a Spectral Combat value, clamped to the table.
pub fn spirit_damage(spectral_combat: i32) -> &'static str {
    let index = div_ceil(spectral_combat, 20);
    let last = SPIRIT_DAMAGE.len() - 1;
    SPIRIT_DAMAGE[usize::try_from(index).unwrap_or(0).min(last)]
}

/// Spirit intensity from POW.
pub fn spirit_intensity(pow: i32) -> i32 {
    pow.saturating_sub(1).div_euclid(6)
}

/// Weapon size steps for a creature's SIZ. Only creatures above SIZ 20
/// scale their weapons.
pub fn size_step(siz: i32) -> i32 {
    if siz > 20 { (siz - 11).div_euclid(10) } else { 0 }
}

/// Scale a weapon's size and reach for a creature of the given SIZ.
pub fn scale_weapon(size: WeaponSize, reach: WeaponReach, siz: i32) -> (WeaponSize, WeaponReach) {
    let step = size_step(siz);
    if step == 0 {
        return (size, reach);
    }
    (size.shifted(step), reach.shifted(step))
}

/// Title of a cult rank.
pub fn cult_rank_title(cult_rank: u8, theist: bool) -> &'static str {
    const THEIST: [&str; 6] = ["None", "Lay Member", "Initiate", "Acolyte", "Priest", "High priest"];
    const OTHER: [&str; 6] = ["None", "Common", "Dedicated", "Proven", "Overseer", "Leader"];
    let index = rank_index(cult_rank);
    if theist { THEIST[index] } else { OTHER[index] }
}

/// Pooled hit points of an elemental, from its POW formula.
///
/// The bonus is the number after the first `+` of the formula, so POW
/// `1d6+6` gives `1d6+12`. Returns the constant part to add to a 1d6 roll.
pub fn elemental_hp_bonus(pow_formula: &str) -> i32 {
    pow_formula
        .split('+')
        .nth(1)
        .and_then(|part| part.trim().parse::<i32>().ok())
        .map_or(0, |bonus| bonus.saturating_mul(2))
}

fn rank_index(cult_rank: u8) -> usize {
    usize::from(cult_rank.min(5))
}
