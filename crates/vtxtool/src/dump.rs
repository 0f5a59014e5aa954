use crate::scene::{Command as SceneCommand, Outcome};
use comfy_table::{
    Cell, CellAlignment, ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS,
    presets::UTF8_FULL,
};
use pvrgl::{
    pvr::{Command, CommandList},
    submit::Submission,
};

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            header
                .iter()
                .map(|h| Cell::new(h).set_alignment(CellAlignment::Center))
                .collect::<Vec<_>>(),
        );

    table
}

fn command_name(command: &SceneCommand) -> String {
    match command {
        SceneCommand::Enable(array) => format!("Enable({array:?})"),
        SceneCommand::Disable(array) => format!("Disable({array:?})"),
        SceneCommand::ActiveTexture(unit) => format!("ActiveTexture({unit})"),
        SceneCommand::VertexPointer { size, ty, .. } => format!("VertexPointer({size}, {ty:?})"),
        SceneCommand::ColorPointer { size, ty, .. } => format!("ColorPointer({size}, {ty:?})"),
        SceneCommand::TexCoordPointer { size, ty, .. } => {
            format!("TexCoordPointer({size}, {ty:?})")
        }
        SceneCommand::NormalPointer { ty, .. } => format!("NormalPointer({ty:?})"),
        SceneCommand::DrawArrays { mode, first, count } => {
            format!("DrawArrays({mode:?}, {first}, {count})")
        }
        SceneCommand::DrawElements { mode, count, ty, .. } => {
            format!("DrawElements({mode:?}, {count}, {ty:?})")
        }
        SceneCommand::GetError => "GetError".to_owned(),
    }
}

/// A table with the outcome of every scene command.
pub fn outcomes_table(commands: &[SceneCommand], outcomes: &[Outcome]) -> Table {
    let mut table = table(&["#", "Command", "Outcome"]);
    for (i, (command, outcome)) in commands.iter().zip(outcomes).enumerate() {
        let outcome = match outcome {
            Outcome::Done => "ok".to_owned(),
            Outcome::Submitted(Submission::Skipped) => "skipped".to_owned(),
            Outcome::Submitted(Submission::Emitted { list, vertices }) => {
                format!("{vertices} vertices to {list:?}")
            }
            Outcome::ErrorCode(code) => format!("error code 0x{code:04X}"),
            Outcome::Failed(err) => format!("failed: {err}"),
        };

        table.add_row(vec![
            Cell::new(i).set_alignment(CellAlignment::Right),
            Cell::new(command_name(command)),
            Cell::new(outcome),
        ]);
    }

    table
}

/// A table with one row per record of `list`.
pub fn list_table(list: &CommandList) -> Table {
    let mut table = table(&["#", "Kind", "Control", "X", "Y", "Z", "ARGB", "U", "V"]);
    for (i, command) in list.commands().enumerate() {
        let row = match command {
            Command::Header(header) => vec![
                Cell::new(i),
                Cell::new("header"),
                Cell::new(format!("0x{:08X}", header.control.to_bits())),
                Cell::new(format!("isp 0x{:08X}", header.isp_tsp.to_bits())),
                Cell::new(format!("tsp 0x{:08X}", header.tsp.to_bits())),
                Cell::new(format!("tex 0x{:08X}", header.texture.to_bits())),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
            ],
            Command::Vertex(vertex) => vec![
                Cell::new(i),
                Cell::new(if vertex.end_of_strip() {
                    "vertex (eos)"
                } else {
                    "vertex"
                }),
                Cell::new(format!("0x{:08X}", vertex.control.to_bits())),
                Cell::new(format!("{:.3}", vertex.x)),
                Cell::new(format!("{:.3}", vertex.y)),
                Cell::new(format!("{:.5}", vertex.z)),
                Cell::new(format!("0x{:08X}", vertex.argb.0)),
                Cell::new(format!("{:.3}", vertex.u)),
                Cell::new(format!("{:.3}", vertex.v)),
            ],
            Command::Unknown(record) => vec![
                Cell::new(i),
                Cell::new("unknown"),
                Cell::new(format!("0x{:08X}", record.0[0])),
            ],
        };

        table.add_row(row);
    }

    table
}
