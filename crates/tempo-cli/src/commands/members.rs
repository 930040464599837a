//! Member directory commands.

use std::fmt::Write as _;

use anyhow::Result;
use uuid::Uuid;

use tempo_core::{MemberId, TeamMember};
use tempo_db::Database;

/// Adds a member to the directory, generating an ID when none is given.
pub fn add(
    db: &mut Database,
    name: &str,
    email: &str,
    role: &str,
    id: Option<&str>,
    avatar_url: Option<String>,
) -> Result<()> {
    let id = match id {
        Some(raw) => MemberId::new(raw)?,
        None => MemberId::new(Uuid::new_v4().to_string())?,
    };
    let member = TeamMember {
        id: id.clone(),
        name: name.to_string(),
        email: email.to_string(),
        avatar_url,
        role: role.to_string(),
    };

    let inserted = db.insert_members(&[member])?;
    if inserted == 0 {
        println!("Member {id} already exists.");
    } else {
        println!("{id}");
    }
    Ok(())
}

/// Lists the member directory.
pub fn list(db: &Database, json: bool) -> Result<()> {
    let members = db.list_members()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&members)?);
    } else {
        print!("{}", format_members(&members));
    }
    Ok(())
}

fn format_members(members: &[TeamMember]) -> String {
    let mut output = String::new();

    if members.is_empty() {
        writeln!(output, "No members in the directory.").unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "Hint: Run 'tempo members add --name <name> --email <email>' to add one."
        )
        .unwrap();
        return output;
    }

    writeln!(
        output,
        "{:<10}  {:<22}  {:<28}  Role",
        "ID", "Name", "Email"
    )
    .unwrap();
    writeln!(
        output,
        "──────────  ──────────────────────  ────────────────────────────  ──────────"
    )
    .unwrap();
    for member in members {
        let id_short: String = member.id.as_str().chars().take(10).collect();
        writeln!(
            output,
            "{:<10}  {:<22}  {:<28}  {}",
            id_short, member.name, member.email, member.role
        )
        .unwrap();
    }

    output
}
