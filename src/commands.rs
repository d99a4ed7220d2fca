use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Доступны данные команды:")]
pub enum Command {
    #[command(description = "показать этот текст.")]
    Help,

    #[command(description = "инициализировать вашу запись в боте.")]
    Start,

    #[command(description = "показать актуальную информацию обо мне в системе.")]
    Info,

    #[command(description = "изменить номер ПОЛИСа (16 цифр).")]
    OmsCard(String),

    #[command(description = "изменить дату рождения (в формате ДД.ММ.ГГГГ).")]
    DateBirth(String),
}
