use serde::{Serialize, Deserialize};

use super::batting::{BattingLine, TeamBatting};

/// Fewest hitters the ordering rules can place
pub const MIN_HITTERS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattingRole {
    Leadoff,
    Second,
    Third,
    Cleanup,
    Middle,
    Anchor,
}

impl BattingRole {
    pub fn label(&self) -> &'static str {
        match self {
            BattingRole::Leadoff => "Leadoff Hitter",
            BattingRole::Second => "Second Hitter",
            BattingRole::Third => "Third Hitter",
            BattingRole::Cleanup => "Cleanup Hitter",
            BattingRole::Middle => "Middle / Lower Order",
            BattingRole::Anchor => "Bottom of the Order",
        }
    }

    /// Why a hitter lands in this role
    pub fn rationale(&self) -> &'static str {
        match self {
            BattingRole::Leadoff => "lowest SLG among the top 3 in OBP: gets on base, leaves the power for later",
            BattingRole::Second => "lowest SLG among the next top 3 in AVG: contact hitter who moves runners",
            BattingRole::Third => "second-highest SLG remaining: power and consistency with runners on",
            BattingRole::Cleanup => "highest SLG remaining: the biggest power threat",
            BattingRole::Middle => "ordered by SLG: keeps innings alive and drives in runs",
            BattingRole::Anchor => "highest OBP left: turns the lineup over to the top",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattingSlot {
    pub order: usize,
    pub role: BattingRole,
    pub player: String,
    pub avg: f64,
    pub obp: f64,
    pub slg: f64,
}

impl BattingSlot {
    fn new(order: usize, role: BattingRole, line: &BattingLine) -> Self {
        BattingSlot {
            order,
            role,
            player: line.name.clone(),
            avg: line.avg(),
            obp: line.obp(),
            slg: line.slg(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BattingOrderError {
    #[error("need at least {need} hitters for a batting order, have {have}")]
    NotEnoughHitters { have: usize, need: usize },
}

type Stat = fn(&BattingLine) -> f64;

/// Pool sorted by `stat`, highest first; ties keep pool order
fn ranked<'a>(pool: &[&'a BattingLine], stat: Stat) -> Vec<&'a BattingLine> {
    let mut sorted = pool.to_vec();
    sorted.sort_by(|a, b| stat(b).total_cmp(&stat(a)));
    sorted
}

/// First entry with the lowest `stat`
fn lowest<'a>(candidates: &[&'a BattingLine], stat: Stat) -> Option<&'a BattingLine> {
    candidates
        .iter()
        .copied()
        .reduce(|best, next| if stat(next) < stat(best) { next } else { best })
}

/// First entry with the highest `stat`
fn highest<'a>(candidates: &[&'a BattingLine], stat: Stat) -> Option<&'a BattingLine> {
    candidates
        .iter()
        .copied()
        .reduce(|best, next| if stat(next) > stat(best) { next } else { best })
}

fn remove(pool: &mut Vec<&BattingLine>, chosen: &BattingLine) {
    pool.retain(|p| p.name != chosen.name);
}

/// Recommends a batting order from season stats.
///
/// Top of the order gets on base, the 3-4 spots carry the power, the middle is
/// ordered by slugging and the last spot goes to the best remaining on-base
/// hitter so the order turns over. Names in `omit` sit out.
pub fn batting_order(team: &TeamBatting, omit: &[String]) -> Result<Vec<BattingSlot>, BattingOrderError> {
    let mut pool: Vec<&BattingLine> = team
        .players
        .iter()
        .filter(|p| !omit.iter().any(|o| o.trim() == p.name.trim()))
        .collect();

    let not_enough = BattingOrderError::NotEnoughHitters {
        have: pool.len(),
        need: MIN_HITTERS,
    };
    if pool.len() < MIN_HITTERS {
        return Err(not_enough);
    }

    let top_obp: Vec<&BattingLine> = ranked(&pool, BattingLine::obp).into_iter().take(3).collect();
    let leadoff = lowest(&top_obp, BattingLine::slg).ok_or_else(|| not_enough.clone())?;
    remove(&mut pool, leadoff);

    let top_avg: Vec<&BattingLine> = ranked(&pool, BattingLine::avg).into_iter().take(3).collect();
    let second = lowest(&top_avg, BattingLine::slg).ok_or_else(|| not_enough.clone())?;
    remove(&mut pool, second);

    let by_slg = ranked(&pool, BattingLine::slg);
    let (cleanup, third) = match by_slg.as_slice() {
        [first, second, ..] => (*first, *second),
        _ => return Err(not_enough),
    };
    remove(&mut pool, third);
    remove(&mut pool, cleanup);

    let anchor = highest(&pool, BattingLine::obp).ok_or_else(|| not_enough.clone())?;
    remove(&mut pool, anchor);

    let mut order = vec![
        BattingSlot::new(1, BattingRole::Leadoff, leadoff),
        BattingSlot::new(2, BattingRole::Second, second),
        BattingSlot::new(3, BattingRole::Third, third),
        BattingSlot::new(4, BattingRole::Cleanup, cleanup),
    ];
    for line in ranked(&pool, BattingLine::slg) {
        order.push(BattingSlot::new(order.len() + 1, BattingRole::Middle, line));
    }
    order.push(BattingSlot::new(order.len() + 1, BattingRole::Anchor, anchor));

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// hits are all singles except `hr` home runs
    fn hitter(name: &str, ab: u32, singles: u32, hr: u32, bb: u32) -> BattingLine {
        BattingLine {
            name: name.to_string(),
            ab,
            singles,
            hr,
            bb,
            ..Default::default()
        }
    }

    fn team() -> TeamBatting {
        let mut team = TeamBatting::new("Freebasers");
        // name, AB, 1B, HR, BB
        team.add_player(hitter("Patient", 10, 4, 0, 6)); // obp .625, slg .400
        team.add_player(hitter("Contact", 10, 6, 0, 0)); // avg .600, slg .600
        team.add_player(hitter("Slugger", 10, 1, 3, 0)); // slg 1.300
        team.add_player(hitter("Power", 10, 2, 2, 0)); // slg 1.000
        team.add_player(hitter("Walker", 10, 2, 0, 5)); // obp .467
        team.add_player(hitter("Steady", 10, 3, 1, 0)); // slg .700
        team.add_player(hitter("Weak", 10, 1, 0, 0)); // slg .100
        team
    }

    #[test]
    fn follows_the_ordering_rules() {
        // Walker: lowest SLG of the top 3 OBP (Patient, Contact, Walker)
        // Patient: lowest SLG of the top 3 AVG left (Contact, Patient, Slugger)
        // Contact: best OBP once the power bats are placed
        let order = batting_order(&team(), &[]).unwrap();
        let names: Vec<&str> = order.iter().map(|s| s.player.as_str()).collect();
        assert_eq!(
            names,
            vec!["Walker", "Patient", "Power", "Slugger", "Steady", "Weak", "Contact"]
        );
        assert_eq!(order[0].role, BattingRole::Leadoff);
        assert_eq!(order[3].role, BattingRole::Cleanup);
        assert_eq!(order[6].role, BattingRole::Anchor);
        assert_eq!(order[6].order, 7);
    }

    #[test]
    fn omitted_players_sit_out() {
        let order = batting_order(&team(), &["Slugger ".to_string()]).unwrap();
        assert_eq!(order.len(), 6);
        assert!(order.iter().all(|s| s.player != "Slugger"));
        assert_eq!(order[3].player, "Power");
    }

    #[test]
    fn too_few_hitters() {
        let mut small = TeamBatting::new("Freebasers");
        for name in ["A", "B", "C", "D"] {
            small.add_player(hitter(name, 4, 1, 0, 0));
        }
        assert_eq!(
            batting_order(&small, &[]),
            Err(BattingOrderError::NotEnoughHitters { have: 4, need: MIN_HITTERS })
        );
    }
}
