use crate::cli::commands::{describe_step, open_session, open_store, run_actions};
use crate::cli::parser::{Cli, CreateArgs, CreateCmd};
use crate::config::Config;
use crate::db::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::{Presence, Status};
use crate::ui::messages::header;
use crate::utils::date;
use crate::utils::time::time_or_default;
use crate::workflow::{Action, CreateForm, CreateTarget, Flow, SharedFields, candidates};

/// Turn the submitted arguments into the engine's form payload.
pub fn build_form(args: &CreateArgs, cfg: &Config) -> AppResult<CreateForm> {
    let job_date = match &args.date {
        Some(d) => date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
        None => date::tomorrow(),
    };

    let presence = Presence::from_code(&args.presence)
        .ok_or_else(|| AppError::Validation(format!("Invalid presence '{}'. Use Y or N.", args.presence)))?;

    let status = Status::from_code(&args.status).ok_or_else(|| {
        AppError::Validation(format!(
            "Invalid status '{}'. Use TBS, WIP, DONE or HOLD.",
            args.status
        ))
    })?;

    let target = match &args.employee {
        Some(employee) => CreateTarget::Individual {
            team: args.team.clone(),
            employee: employee.clone(),
        },
        None => CreateTarget::Team {
            team: args.team.clone(),
            members: args.members.clone(),
        },
    };

    Ok(CreateForm {
        target,
        fields: SharedFields {
            job_date,
            presence,
            project: args.project.clone(),
            phase_space: args.phase_space.clone(),
            product: args.product.clone(),
            part_number: args.part_number.clone(),
            part_name: args.part_name.clone(),
            task: args.task.clone(),
            task_quantity: args.task_quantity,
            start_time: time_or_default(args.start.as_ref(), &cfg.default_start_time)?,
            finish_time: time_or_default(args.finish.as_ref(), &cfg.default_finish_time)?,
            status,
            remarks: args.remarks.clone(),
        },
    })
}

/// Handle the `create` subcommands.
pub fn handle(cli: &Cli, action: &CreateCmd, cfg: &Config) -> AppResult<()> {
    let actions = match action {
        CreateCmd::Start { mode } => {
            header("Create New Entry");
            let mut acts = vec![Action::Start(Flow::Create)];
            if let Some(m) = mode {
                acts.push(Action::ConfirmMode(*m));
            }
            acts
        }
        CreateCmd::Mode { mode } => vec![Action::ConfirmMode(*mode)],
        CreateCmd::Submit(args) => vec![Action::SubmitCreate(build_form(args, cfg)?)],
        CreateCmd::Back => vec![Action::Back],
        CreateCmd::Options => {
            let mut store = open_store(cfg)?;
            let records = store.read_all()?;
            println!("Teams:     {}", candidates::teams(records).join(", "));
            println!("Employees: {}", candidates::employees(records).join(", "));
            println!("Projects:  {}", candidates::projects(records).join(", "));
            let ctx = open_session(&store, cli, cfg)?;
            return describe_step(&mut store, &ctx, cfg);
        }
    };

    let (mut store, ctx) = run_actions(cli, cfg, actions)?;
    describe_step(&mut store, &ctx, cfg)
}
