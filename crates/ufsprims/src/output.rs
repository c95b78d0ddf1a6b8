use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use ufsprims_device::{DmeTarget, QueryOperation, QueryOutcome};
use ufsprims_registry::{
    field_table_for, interpret, name_or_unknown, ATTRIBUTES, DESCRIPTORS, FLAGS,
    UNIPRO_MPHY_ATTRIBUTES,
};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FieldOutput {
    offset: usize,
    name: &'static str,
    value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    notes: Vec<String>,
}

#[derive(Serialize)]
struct DescriptorOutput {
    schema_id: &'static str,
    idn: u8,
    name: &'static str,
    length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldOutput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<Vec<String>>,
}

#[derive(Serialize)]
struct AttributeOutput {
    schema_id: &'static str,
    idn: u8,
    name: &'static str,
    index: u8,
    value: u64,
}

#[derive(Serialize)]
struct FlagOutput {
    schema_id: &'static str,
    idn: u8,
    name: &'static str,
    index: u8,
    value: bool,
}

#[derive(Serialize)]
struct WrittenOutput {
    schema_id: &'static str,
    operation: &'static str,
    idn: u8,
    name: &'static str,
    index: u8,
}

#[derive(Serialize)]
struct UicOutput {
    schema_id: &'static str,
    operation: &'static str,
    target: &'static str,
    attr_id: u32,
    name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<u32>,
}

pub fn print_query_outcome(op: &QueryOperation, outcome: &QueryOutcome, format: OutputFormat) {
    match outcome {
        QueryOutcome::Descriptor(buf) => print_descriptor(op, buf, format),
        QueryOutcome::Attribute(value) => print_attribute(op, *value, format),
        QueryOutcome::Flag(value) => print_flag(op, *value, format),
        QueryOutcome::Written => print_written(op, format),
    }
}

fn print_descriptor(op: &QueryOperation, buf: &[u8], format: OutputFormat) {
    let name = name_or_unknown(DESCRIPTORS, u32::from(op.idn));
    let fields = field_table_for(op.idn).map(|table| interpret(buf, buf.len(), table));

    match format {
        OutputFormat::Json => {
            let out = DescriptorOutput {
                schema_id: "https://schemas.3leaps.dev/ufsprims/cli/v1/descriptor.schema.json",
                idn: op.idn,
                name,
                length: buf.len(),
                fields: fields.map(|fields| {
                    fields
                        .into_iter()
                        .map(|f| FieldOutput {
                            offset: f.offset,
                            name: f.name,
                            value: f.hex_value(),
                            notes: f.notes,
                        })
                        .collect()
                }),
                raw: match field_table_for(op.idn) {
                    Some(_) => None,
                    None => Some(buf.iter().map(|b| format!("0x{b:02x}")).collect()),
                },
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            println!("Descriptor IDN 0x{:x} - {name} :", op.idn);
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["OFFSET", "FIELD", "VALUE"]);
            match fields {
                Some(fields) => {
                    for f in fields {
                        table.add_row(vec![
                            format!("0x{:02X}", f.offset),
                            f.name.to_string(),
                            f.hex_value(),
                        ]);
                    }
                }
                None => {
                    for (offset, byte) in buf.iter().enumerate() {
                        table.add_row(vec![
                            format!("0x{offset:02X}"),
                            String::new(),
                            format!("0x{byte:02X}"),
                        ]);
                    }
                }
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("Descriptor IDN 0x{:x} - {name} :", op.idn);
            match fields {
                Some(fields) => {
                    for f in fields {
                        println!("0x{:02X}: {:<35} = {}", f.offset, f.name, f.hex_value());
                        for note in &f.notes {
                            println!("    # {note}");
                        }
                    }
                }
                None => {
                    for (offset, byte) in buf.iter().enumerate() {
                        println!("Offset 0x{offset:x} : 0x{byte:x}");
                    }
                }
            }
        }
    }
}

fn print_attribute(op: &QueryOperation, value: u64, format: OutputFormat) {
    let name = name_or_unknown(ATTRIBUTES, u32::from(op.idn));
    match format {
        OutputFormat::Json => print_json(&AttributeOutput {
            schema_id: "https://schemas.3leaps.dev/ufsprims/cli/v1/attribute.schema.json",
            idn: op.idn,
            name,
            index: op.index,
            value,
        }),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!(
                "Attribute IDN 0x{:x} - {name}, Index 0x{:x} : 0x{value:x}",
                op.idn, op.index
            );
        }
    }
}

fn print_flag(op: &QueryOperation, value: bool, format: OutputFormat) {
    let name = name_or_unknown(FLAGS, u32::from(op.idn));
    match format {
        OutputFormat::Json => print_json(&FlagOutput {
            schema_id: "https://schemas.3leaps.dev/ufsprims/cli/v1/flag.schema.json",
            idn: op.idn,
            name,
            index: op.index,
            value,
        }),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!(
                "Flag IDN 0x{:x} - {name}, Index 0x{:x} : {}",
                op.idn,
                op.index,
                u8::from(value)
            );
        }
    }
}

fn print_written(op: &QueryOperation, format: OutputFormat) {
    use ufsprims_upiu::QueryOpcode;

    let (operation, table) = match op.opcode {
        QueryOpcode::WriteAttribute => ("write attribute", ATTRIBUTES),
        QueryOpcode::SetFlag => ("set flag", FLAGS),
        QueryOpcode::ClearFlag => ("clear flag", FLAGS),
        _ => ("toggle flag", FLAGS),
    };
    let name = name_or_unknown(table, u32::from(op.idn));

    match format {
        OutputFormat::Json => print_json(&WrittenOutput {
            schema_id: "https://schemas.3leaps.dev/ufsprims/cli/v1/written.schema.json",
            operation,
            idn: op.idn,
            name,
            index: op.index,
        }),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!(
                "Successfully {operation} IDN 0x{:x} - {name}, Index 0x{:x}",
                op.idn, op.index
            );
        }
    }
}

pub fn print_uic_result(
    target: DmeTarget,
    attr_id: u32,
    value: Option<u32>,
    format: OutputFormat,
) {
    let name = name_or_unknown(UNIPRO_MPHY_ATTRIBUTES, attr_id);
    let target_label = match target {
        DmeTarget::Local => "local",
        DmeTarget::Peer => "peer",
    };

    match format {
        OutputFormat::Json => print_json(&UicOutput {
            schema_id: "https://schemas.3leaps.dev/ufsprims/cli/v1/uic.schema.json",
            operation: if value.is_some() { "get" } else { "set" },
            target: target_label,
            attr_id,
            name,
            value,
        }),
        OutputFormat::Table | OutputFormat::Pretty => match value {
            Some(value) => {
                println!("{target_label} Attribute ID 0x{attr_id:x} - {name} = 0x{value:x}");
            }
            None => {
                println!("Successfully set {target_label} Attribute ID 0x{attr_id:x} - {name}");
            }
        },
    }
}

fn print_json<T: Serialize>(out: &T) {
    println!(
        "{}",
        serde_json::to_string(out).unwrap_or_else(|_| "{}".to_string())
    );
}
