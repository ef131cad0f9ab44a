use serde::{Serialize, Deserialize};

/// Name used for the team totals row
pub const TOTALS_NAME: &str = "TOTAL";

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn rate(numerator: u32, denominator: u32) -> f64 {
    if denominator > 0 {
        round3(numerator as f64 / denominator as f64)
    } else {
        0.0
    }
}

/// Counting stats for one player (or one game, or the team)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattingLine {
    pub name: String,
    pub ab: u32,
    pub runs: u32,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub hr: u32,
    pub rbi: u32,
    pub bb: u32,
    pub so: u32,
    pub sf: u32,
    pub ab_risp: u32,
    pub h_risp: u32,
}

impl BattingLine {
    pub fn new(name: &str) -> Self {
        BattingLine {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn hits(&self) -> u32 {
        self.singles + self.doubles + self.triples + self.hr
    }

    pub fn total_bases(&self) -> u32 {
        self.singles + 2 * self.doubles + 3 * self.triples + 4 * self.hr
    }

    pub fn plate_appearances(&self) -> u32 {
        self.ab + self.bb + self.sf
    }

    pub fn avg(&self) -> f64 {
        rate(self.hits(), self.ab)
    }

    pub fn obp(&self) -> f64 {
        rate(self.hits() + self.bb, self.plate_appearances())
    }

    pub fn slg(&self) -> f64 {
        rate(self.total_bases(), self.ab)
    }

    pub fn ops(&self) -> f64 {
        round3(self.obp() + self.slg())
    }

    /// Isolated power: SLG - AVG
    pub fn iso(&self) -> f64 {
        round3(self.slg() - self.avg())
    }

    pub fn ba_risp(&self) -> f64 {
        rate(self.h_risp, self.ab_risp)
    }

    /// RISP hits can't exceed total hits; a line where they do was mis-scored
    pub fn has_consistent_risp(&self) -> bool {
        self.h_risp <= self.hits()
    }

    pub fn accumulate(&mut self, other: &BattingLine) {
        self.ab += other.ab;
        self.runs += other.runs;
        self.singles += other.singles;
        self.doubles += other.doubles;
        self.triples += other.triples;
        self.hr += other.hr;
        self.rbi += other.rbi;
        self.bb += other.bb;
        self.so += other.so;
        self.sf += other.sf;
        self.ab_risp += other.ab_risp;
        self.h_risp += other.h_risp;
    }

    pub fn row(&self) -> StatRow {
        StatRow {
            player: self.name.clone(),
            ab: self.ab,
            h: self.hits(),
            hr: self.hr,
            r: self.runs,
            rbi: self.rbi,
            bb: self.bb,
            so: self.so,
            sf: self.sf,
            avg: self.avg(),
            obp: self.obp(),
            slg: self.slg(),
            ops: self.ops(),
            ba_risp: self.ba_risp(),
            iso: self.iso(),
        }
    }
}

/// The season table columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct StatRow {
    #[serde(rename = "Player")]
    pub player: String,
    pub ab: u32,
    pub h: u32,
    pub hr: u32,
    pub r: u32,
    pub rbi: u32,
    pub bb: u32,
    pub so: u32,
    pub sf: u32,
    pub avg: f64,
    pub obp: f64,
    pub slg: f64,
    pub ops: f64,
    #[serde(rename = "BA_RISP")]
    pub ba_risp: f64,
    pub iso: f64,
}

/// A team's batting lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamBatting {
    pub team: String,
    pub players: Vec<BattingLine>,
}

impl TeamBatting {
    pub fn new(team: &str) -> Self {
        TeamBatting {
            team: team.to_string(),
            players: Vec::new(),
        }
    }

    /// Adds a player, replacing any earlier line with the same name
    pub fn add_player(&mut self, line: BattingLine) {
        match self.players.iter_mut().find(|p| p.name == line.name) {
            Some(existing) => *existing = line,
            None => self.players.push(line),
        }
    }

    pub fn get(&self, name: &str) -> Option<&BattingLine> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn totals(&self) -> BattingLine {
        let mut total = BattingLine::new(TOTALS_NAME);
        for line in &self.players {
            total.accumulate(line);
        }
        total
    }

    pub fn rows(&self) -> Vec<StatRow> {
        self.players.iter().map(|p| p.row()).collect()
    }

    /// Rows ordered by batting average, best first
    pub fn rows_by_avg(&self) -> Vec<StatRow> {
        let mut rows = self.rows();
        rows.sort_by(|a, b| b.avg.total_cmp(&a.avg));
        rows
    }
}
