//! The fixed catalog of read-only queries.
//!
//! Each entry demonstrates one SQL concept against the European soccer
//! dataset. Entries take no parameters and are run in catalog order.
//! Several entries knowingly keep the behaviour of the statements they were
//! written as; see each entry's `note`.

use crate::error::{Result, SoccerSqlError};

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// 1-based position in the catalog.
    pub number: u8,
    /// The SQL concept the entry demonstrates.
    pub concept: &'static str,
    /// What the entry retrieves.
    pub title: &'static str,
    /// The statement executed.
    pub sql: &'static str,
    /// Known divergence between title and statement, if any.
    pub note: Option<&'static str>,
}

impl CatalogEntry {
    /// Short label used in logs and error messages.
    pub fn label(&self) -> String {
        format!("query {} [{}]", self.number, self.concept)
    }
}

/// The catalog, in execution order.
pub static CATALOG: [CatalogEntry; 20] = [
    CatalogEntry {
        number: 1,
        concept: "SELECT",
        title: "Names of all countries",
        sql: "SELECT name
FROM Country;",
        note: None,
    },
    CatalogEntry {
        number: 2,
        concept: "WHERE",
        title: "Leagues of the country named Spain",
        sql: "SELECT name
FROM League
WHERE country_id = (
    SELECT id
    FROM Country
    WHERE name = 'Spain'
);",
        note: None,
    },
    CatalogEntry {
        number: 3,
        concept: "JOIN",
        title: "Match results with home and away team names for season 2015/2016",
        sql: "SELECT M.match_api_id, TH.team_long_name AS home_team_name, TA.team_long_name AS away_team_name, M.home_team_goal, M.away_team_goal
FROM Match M
JOIN Team TH ON M.home_team_api_id = TH.team_api_id
JOIN Team TA ON M.away_team_api_id = TA.team_api_id
WHERE season = '2015/2016';",
        note: None,
    },
    CatalogEntry {
        number: 4,
        concept: "GROUP BY",
        title: "Total goals per team, grouped by country and league",
        sql: "SELECT C.name AS country_name, L.name AS league_name, T.team_long_name, SUM(M.home_team_goal + M.away_team_goal) AS total_goals
FROM Match M
JOIN Team T ON M.home_team_api_id = T.team_api_id
JOIN League L ON M.league_id = L.id
JOIN Country C ON L.country_id = C.id
GROUP BY C.name, L.name, T.team_long_name;",
        note: Some(
            "Team is bound through the home side only; totals are both teams' goals in the team's home matches.",
        ),
    },
    CatalogEntry {
        number: 5,
        concept: "HAVING",
        title: "Average goals per match for teams with more than 10 matches",
        sql: "SELECT team.team_long_name, COUNT(match.match_api_id) AS Match_count, AVG(match.home_team_goal + match.away_team_goal) AS Average_score
FROM team
JOIN Match ON team.team_api_id = match.home_team_api_id
GROUP BY team.team_long_name
HAVING COUNT(*) > 10;",
        note: Some("Home matches only; the group filter is a match count strictly greater than 10."),
    },
    CatalogEntry {
        number: 6,
        concept: "ORDER BY",
        title: "Player names and heights, tallest first",
        sql: "SELECT player_name, height
FROM Player
ORDER BY height DESC;",
        note: None,
    },
    CatalogEntry {
        number: 7,
        concept: "LIMIT",
        title: "Top 10 teams by goals scored",
        sql: "SELECT team.team_long_name, COUNT(match.home_team_goal + match.away_team_goal) AS Team_goals
FROM team
JOIN match ON team.team_api_id = match.home_team_api_id
GROUP BY team.team_long_name
ORDER BY Team_goals DESC
LIMIT 10;",
        note: Some(
            "Team_goals counts home matches with both scores recorded; it does not sum goals.",
        ),
    },
    CatalogEntry {
        number: 8,
        concept: "DISTINCT",
        title: "Unique seasons",
        sql: "SELECT DISTINCT season
FROM match;",
        note: None,
    },
    CatalogEntry {
        number: 9,
        concept: "NULL",
        title: "Players whose height is not recorded",
        sql: "SELECT player_name
FROM player
WHERE height IS NULL;",
        note: None,
    },
    CatalogEntry {
        number: 10,
        concept: "SUBQUERY",
        title: "Players taller than the average height",
        sql: "SELECT player_name
FROM Player
WHERE height > (
    SELECT AVG(height)
    FROM Player
);",
        note: None,
    },
    CatalogEntry {
        number: 11,
        concept: "BETWEEN",
        title: "Matches where the home team scored between 3 and 5 goals",
        sql: "SELECT player_name
FROM player
WHERE height > (
    SELECT AVG(height)
    FROM player
);",
        note: Some(
            "Runs the same statement as query 10, not a BETWEEN filter; kept as written.",
        ),
    },
    CatalogEntry {
        number: 12,
        concept: "LIKE",
        title: "Teams whose long name starts with FC",
        sql: "SELECT team_long_name
FROM team
WHERE team_long_name LIKE 'FC%';",
        note: None,
    },
    CatalogEntry {
        number: 13,
        concept: "COUNT",
        title: "Number of matches per league",
        sql: "SELECT L.name AS league_name, COUNT(*) AS match_count
FROM Match M
JOIN League L ON M.league_id = L.id
GROUP BY L.name;",
        note: None,
    },
    CatalogEntry {
        number: 14,
        concept: "MAX",
        title: "Player name with the greatest height",
        sql: "SELECT player_name, MAX(height)
FROM player;",
        note: None,
    },
    CatalogEntry {
        number: 15,
        concept: "MIN",
        title: "Player name with the lowest weight",
        sql: "SELECT player_name, MIN(weight) AS lowest_weight
FROM Player;",
        note: None,
    },
    CatalogEntry {
        number: 16,
        concept: "SUM",
        title: "Total goals per team",
        sql: "SELECT team.team_long_name, SUM(match.home_team_goal + match.away_team_goal) AS Total_of_goals_scored
FROM match
JOIN team ON match.home_team_api_id = team.team_api_id
GROUP BY team.team_long_name
ORDER BY Total_of_goals_scored;",
        note: Some("Home matches only, ascending by total."),
    },
    CatalogEntry {
        number: 17,
        concept: "AVG",
        title: "Average player weight",
        sql: "SELECT AVG(weight)
FROM player;",
        note: None,
    },
    CatalogEntry {
        number: 18,
        concept: "IN",
        title: "Teams that played in season 2012/2013 or 2013/2014",
        sql: "SELECT team_long_name
FROM team
WHERE team_api_id IN (
    SELECT home_team_api_id
    FROM match
    WHERE season IN ('2012/2013', '2013/2014')
);",
        note: Some("A team qualifies through its home matches."),
    },
    CatalogEntry {
        number: 19,
        concept: "MULTI-TABLE JOIN",
        title: "All matches with country, league and team names",
        sql: "SELECT Match.id,
    Country.name AS country_name,
    League.name AS league_name,
    season, stage, date,
    HT.team_long_name AS home_team,
    AT.team_long_name AS away_team,
    home_team_goal, away_team_goal
FROM Match
JOIN Country ON Country.id = Match.country_id
JOIN League ON League.id = Match.league_id
LEFT JOIN Team AS HT ON HT.team_api_id = Match.home_team_api_id
LEFT JOIN Team AS AT ON AT.team_api_id = Match.away_team_api_id
ORDER BY country_name, date;",
        note: None,
    },
    CatalogEntry {
        number: 20,
        concept: "CASE",
        title: "Height distribution with average rating, potential and weight",
        sql: "SELECT CASE
        WHEN ROUND(height) < 165 THEN 165
        WHEN ROUND(height) > 195 THEN 195
        ELSE ROUND(height)
    END AS calculated_height,
    COUNT(height) AS distribution,
    AVG(PA_Grouped.averege_overall_rating) AS averege_overall_rating,
    AVG(PA_Grouped.averege_potential) AS averege_potential,
    AVG(weight) AS averege_weight
FROM Player
LEFT JOIN (
    SELECT Player_Attributes.player_api_id,
        AVG(Player_Attributes.overall_rating) AS averege_overall_rating,
        AVG(Player_Attributes.potential) AS averege_potential
    FROM Player_Attributes
    GROUP BY Player_Attributes.player_api_id
) AS PA_Grouped ON Player.player_api_id = PA_Grouped.player_api_id
GROUP BY calculated_height
ORDER BY calculated_height;",
        note: Some("Ratings are averaged per player first, then across the players in a bucket."),
    },
];

/// Returns the whole catalog in execution order.
pub fn catalog() -> &'static [CatalogEntry] {
    &CATALOG
}

/// Looks up a catalog entry by its number.
pub fn entry(number: u8) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.number == number)
}

/// Resolves a selection of entry numbers.
///
/// An empty selection means the whole catalog. Entries always come back in
/// catalog order with duplicates removed, whatever order they were requested in.
pub fn select(numbers: &[u8]) -> Result<Vec<&'static CatalogEntry>> {
    if numbers.is_empty() {
        return Ok(CATALOG.iter().collect());
    }

    if let Some(unknown) = numbers.iter().find(|n| entry(**n).is_none()) {
        return Err(SoccerSqlError::config(format!(
            "unknown catalog entry {unknown}; expected a number from 1 to {}",
            CATALOG.len()
        )));
    }

    Ok(CATALOG
        .iter()
        .filter(|e| numbers.contains(&e.number))
        .collect())
}
