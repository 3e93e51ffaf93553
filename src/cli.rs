// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).value_parser(value_parser!(i64))
}

pub fn build_cli() -> Command {
    Command::new("bolsillo")
        .about("Personal finance tracker: income sources, expenses, loans, credits, wishlist")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("salary").about("Legacy scalar salary").subcommand(
                Command::new("set")
                    .about("Set the salary for the current month")
                    .arg(Arg::new("amount").required(true)),
            ),
        )
        .subcommand(
            Command::new("currency")
                .about("Display currency")
                .subcommand(
                    Command::new("set").arg(Arg::new("currency").required(true)),
                )
                .subcommand(Command::new("show")),
        )
        .subcommand(
            Command::new("income")
                .about("Income sources and received transactions")
                .subcommand(
                    Command::new("add")
                        .about("Add an income source")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("amount").required(true))
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .short('f')
                                .required(true)
                                .help("weekly|biweekly|monthly|occasional"),
                        )
                        .arg(
                            Arg::new("day")
                                .long("day")
                                .value_parser(value_parser!(u32))
                                .help("Day of month payment arrives (1-31)"),
                        )
                        .arg(Arg::new("category").long("category").default_value("otros"))
                        .arg(
                            Arg::new("inactive")
                                .long("inactive")
                                .action(ArgAction::SetTrue)
                                .help("Create the source deactivated"),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("update")
                        .about("Update amount and/or payment day")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount"))
                        .arg(
                            Arg::new("day")
                                .long("day")
                                .value_parser(value_parser!(u32)),
                        ),
                )
                .subcommand(Command::new("toggle").about("Flip active flag").arg(id_arg()))
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(
                    Command::new("tx")
                        .about("Actual money received")
                        .subcommand(
                            Command::new("add")
                                .arg(Arg::new("amount").required(true))
                                .arg(
                                    Arg::new("date")
                                        .long("date")
                                        .help("Received date, defaults to today"),
                                )
                                .arg(
                                    Arg::new("source")
                                        .long("source")
                                        .value_parser(value_parser!(i64))
                                        .help("Income source id; omit for ad-hoc receipts"),
                                )
                                .arg(Arg::new("note").long("note")),
                        )
                        .subcommand(json_flags(Command::new("list")))
                        .subcommand(Command::new("rm").arg(id_arg())),
                ),
        )
        .subcommand(
            Command::new("expense")
                .about("Regular monthly expenses")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("description").required(true))
                        .arg(Arg::new("amount").required(true))
                        .arg(
                            Arg::new("day")
                                .long("day")
                                .required(true)
                                .value_parser(value_parser!(u32))
                                .help("Day of month the payment is due (1-31)"),
                        )
                        .arg(Arg::new("category").long("category").default_value("otros")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("pay")
                        .about("Toggle this cycle's paid flag")
                        .arg(id_arg()),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("sporadic")
                .about("One-off expenses")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("description").required(true))
                        .arg(Arg::new("amount").required(true))
                        .arg(Arg::new("date").long("date").help("Defaults to today"))
                        .arg(Arg::new("category").long("category").default_value("otros")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("loan")
                .about("Money owed to you")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("description").required(true))
                        .arg(Arg::new("amount").required(true))
                        .arg(
                            Arg::new("probability")
                                .long("probability")
                                .short('p')
                                .default_value("100")
                                .value_parser(value_parser!(u32))
                                .help("Recovery probability 0-100"),
                        )
                        .arg(Arg::new("expected").long("expected").help("Expected repayment date")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("pay")
                        .about("Record a partial repayment")
                        .arg(id_arg())
                        .arg(Arg::new("amount").required(true))
                        .arg(Arg::new("date").long("date").help("Defaults to today"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(
                    Command::new("status")
                        .about("Explicit status override (mark lost/completed)")
                        .arg(id_arg())
                        .arg(
                            Arg::new("status")
                                .required(true)
                                .help("pending|overdue|partial|completed|lost"),
                        ),
                )
                .subcommand(
                    Command::new("extend")
                        .about("Push the expected date into the future")
                        .arg(id_arg())
                        .arg(Arg::new("date").required(true)),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("credit")
                .about("Debts you are paying down")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("amount").required(true).help("Total amount owed"))
                        .arg(Arg::new("monthly").long("monthly").required(true))
                        .arg(Arg::new("rate").long("rate").default_value("0"))
                        .arg(Arg::new("start").long("start").help("Start date, defaults to today"))
                        .arg(
                            Arg::new("day")
                                .long("day")
                                .required(true)
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(Arg::new("end").long("end"))
                        .arg(Arg::new("category").long("category").default_value("otros"))
                        .arg(Arg::new("priority").long("priority").default_value("media")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("status")
                        .arg(id_arg())
                        .arg(Arg::new("status").required(true).help("active|paid|overdue|paused")),
                )
                .subcommand(
                    Command::new("pay")
                        .about("Record a payment; principal reduces the remaining amount")
                        .arg(id_arg())
                        .arg(Arg::new("amount").required(true))
                        .arg(Arg::new("principal").long("principal").help("Defaults to the full amount"))
                        .arg(Arg::new("interest").long("interest").default_value("0"))
                        .arg(Arg::new("fees").long("fees").default_value("0"))
                        .arg(Arg::new("date").long("date").help("Defaults to today"))
                        .arg(Arg::new("due").long("due").help("Due date, defaults to payment date")),
                )
                .subcommand(
                    Command::new("installment")
                        .about("Scheduled installments")
                        .subcommand(
                            Command::new("add")
                                .arg(Arg::new("credit").required(true).value_parser(value_parser!(i64)))
                                .arg(Arg::new("number").required(true).value_parser(value_parser!(u32)))
                                .arg(Arg::new("amount").required(true))
                                .arg(Arg::new("due").long("due").required(true)),
                        )
                        .subcommand(Command::new("pay").arg(id_arg())),
                )
                .subcommand(
                    json_flags(
                        Command::new("installments")
                            .about("Unpaid installments due soon")
                            .arg(
                                Arg::new("days")
                                    .long("days")
                                    .default_value("7")
                                    .value_parser(value_parser!(i64)),
                            ),
                    ),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("wish")
                .about("Wishlist")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("item").required(true))
                        .arg(Arg::new("price").required(true))
                        .arg(
                            Arg::new("priority")
                                .long("priority")
                                .default_value("media")
                                .help("alta|media|baja"),
                        )
                        .arg(Arg::new("category").long("category").default_value("otros")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("buy")
                        .about("Purchase: create the expense, then remove the wish")
                        .arg(id_arg())
                        .arg(Arg::new("price").long("price").help("Actual price paid"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date").help("Defaults to today")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(json_flags(
            Command::new("dashboard").about("Balances, upcoming events, affordability"),
        ))
        .subcommand(
            Command::new("export")
                .about("Snapshot dump")
                .arg(Arg::new("out").long("out").required(true))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("json")
                        .help("json|csv"),
                ),
        )
        .subcommand(Command::new("doctor").about("Data integrity scan"))
}
